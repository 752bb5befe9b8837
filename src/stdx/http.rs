pub static DEFAULT_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

/// Header the site reads the anti-forgery token from on `XMLHttpRequest`s.
pub static CSRF_HEADER: &str = "X-CSRFToken";

/// Form field the site reads the anti-forgery token from on form posts.
pub static CSRF_FIELD: &str = "csrfmiddlewaretoken";
