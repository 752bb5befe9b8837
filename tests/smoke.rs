//! Runs against a live deployment of the site, e.g.
//! `MOVIEREVIEWS_URL=http://localhost:8000 cargo test --test smoke -- --ignored`.

use moviereviews::{Client, error::Error};

fn client() -> Option<Client> {
    let Ok(url) = std::env::var("MOVIEREVIEWS_URL") else {
        eprintln!("MOVIEREVIEWS_URL not set, skipping");
        return None;
    };

    Some(
        Client::builder()
            .base_url(&url)
            .build()
            .expect("MOVIEREVIEWS_URL should be a valid URL"),
    )
}

#[tokio::test]
#[ignore = "needs a running site"]
async fn home_page() -> Result<(), Error> {
    let Some(client) = client() else {
        return Ok(());
    };

    let page = client.page("/").await?;

    println!("csrf token present: {}", !page.csrf_token().is_empty());
    println!("like widgets: {}", page.likes().len());
    println!("reaction widgets: {}", page.reactions().len());

    for like in page.likes() {
        println!("{}: {} ({})", like.post, like.likes_count, like.liked);
    }

    Ok(())
}

#[tokio::test]
#[ignore = "needs a running site"]
async fn subcategories() -> Result<(), Error> {
    let Some(client) = client() else {
        return Ok(());
    };

    for subcategory in client.subcategories(1).await? {
        println!("{}: {}", subcategory.id, subcategory.name);
    }

    Ok(())
}

#[tokio::test]
#[ignore = "needs a running site"]
async fn anonymous_like_should_not_succeed() -> Result<(), Error> {
    let Some(client) = client() else {
        return Ok(());
    };

    let page = client.page("/").await?;
    let Some(like) = page.likes().first() else {
        println!("no like widgets on the home page");
        return Ok(());
    };

    // Without a session the site redirects to its login page or refuses outright.
    let result = client.toggle_like(&like.post).await;
    println!("{result:?}");
    assert!(result.is_err());

    Ok(())
}
