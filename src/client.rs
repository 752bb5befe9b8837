//! Represents a client abstraction for the review site.

mod api;

use crate::{
    PostRef,
    client::api::{
        comment::RawCommentResponse, like::RawLikeResponse, reaction::RawReactionResponse,
        subcategory::RawSubcategory,
    },
    comment::{Comment, Subcategory},
    csrf::CsrfToken,
    error::{
        ClientBuilderError, CommentError, EndpointError, HttpStatus, RequestError, ToggleError,
    },
    like::LikeState,
    page::Page,
    reaction::{ReactionKind, ReactionState},
    stdx::{
        error::{Assume, Assumption, assumption},
        http::{CSRF_FIELD, CSRF_HEADER, DEFAULT_USER_AGENT},
    },
};
use futures::future::{BoxFuture, FutureExt};
use parking_lot::RwLock;
use reqwest::RequestBuilder;
use std::{fmt::Display, sync::Arc};
use url::Url;

/// Where the site is served from when no base URL is given.
const DEFAULT_BASE_URL: &str = "http://localhost:8000/";

/// The remote side of the interaction widgets.
///
/// [`Client`] implements this over HTTP. The widgets only ever talk to a
/// `Backend`, which makes it the seam for plugging in something else, such as
/// a scripted backend in tests.
pub trait Backend: Send + Sync {
    /// Toggles the current user's like on `post`, returning the state the site
    /// settled on.
    fn toggle_like<'a>(&'a self, post: &'a PostRef)
    -> BoxFuture<'a, Result<LikeState, ToggleError>>;

    /// Toggles the current user's `kind` reaction on `post`, returning the
    /// state the site settled on.
    ///
    /// Reacting with the same kind twice removes it, reacting with a different
    /// kind replaces it.
    fn toggle_reaction<'a>(
        &'a self,
        post: &'a PostRef,
        kind: ReactionKind,
    ) -> BoxFuture<'a, Result<ReactionState, ToggleError>>;
}

/// A builder for configuring and creating instances of [`Client`] with custom settings.
///
/// # Example
///
/// ```
/// # use moviereviews::ClientBuilder;
/// let client = ClientBuilder::new()
///     .base_url("https://reviews.example.com")
///     .user_agent("custom-agent/1.0")
///     .build()?;
///
/// assert_eq!("https://reviews.example.com/", client.base_url().as_str());
/// # Ok::<(), moviereviews::error::ClientBuilderError>(())
/// ```
#[derive(Debug)]
pub struct ClientBuilder {
    builder: reqwest::ClientBuilder,
    base_url: String,
    session: Session,
    csrf: CsrfToken,
}

impl Default for ClientBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    ///
    /// This includes a default user agent (`$CARGO_PKG_NAME/$CARGO_PKG_VERSION`)
    /// and the local development address of the site as base URL.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        let builder = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .use_rustls_tls()
            .brotli(true);

        Self {
            builder,
            base_url: DEFAULT_BASE_URL.to_owned(),
            session: Session::default(),
            csrf: CsrfToken::default(),
        }
    }

    /// Sets the URL the site is served from. Every endpoint is resolved
    /// relative to it.
    #[inline]
    #[must_use]
    pub fn base_url(mut self, url: &str) -> Self {
        url.clone_into(&mut self.base_url);
        self
    }

    /// Configures the `ClientBuilder` to use the specified session for
    /// authenticated requests.
    ///
    /// Liking, reacting and commenting all require a logged in session.
    #[inline]
    #[must_use]
    pub fn with_session(mut self, session: &str) -> Self {
        self.session = Session::new(session);
        self
    }

    /// Sets the anti-forgery token to send with state-changing requests.
    ///
    /// This is also refreshed by every [`Client::page`] call.
    #[inline]
    #[must_use]
    pub fn csrf_token(mut self, token: CsrfToken) -> Self {
        self.csrf = token;
        self
    }

    /// Sets a custom `User-Agent` header for the [`Client`].
    #[inline]
    #[must_use]
    pub fn user_agent(self, user_agent: &str) -> Self {
        let builder = self.builder.user_agent(user_agent);
        Self { builder, ..self }
    }

    /// Consumes the `ClientBuilder` and returns a fully-configured [`Client`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientBuilderError::InvalidBaseUrl`] if the base URL does not
    /// parse, and [`ClientBuilderError::BuildFailed`] if the underlying HTTP
    /// client could not be built, such as when TLS initialization fails.
    #[inline]
    pub fn build(self) -> Result<Client, ClientBuilderError> {
        let mut base = Url::parse(&self.base_url)?;

        // Joining endpoints onto `/blog` would replace `blog`, onto `/blog/` appends.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Client {
            http: self
                .builder
                .build()
                .map_err(|_err| ClientBuilderError::BuildFailed)?,
            base: Arc::new(base),
            session: self.session,
            csrf: Arc::new(RwLock::new(self.csrf)),
        })
    }
}

/// A high-level, asynchronous client to interact with the review site.
///
/// Clones are cheap and share the connection pool and the anti-forgery token.
///
/// # Example
///
/// ```no_run
/// # use moviereviews::{Client, PostRef};
/// # #[tokio::main]
/// # async fn main() -> Result<(), moviereviews::error::Error> {
/// let client = Client::builder()
///     .base_url("https://reviews.example.com")
///     .with_session("session-id")
///     .build()
///     .expect("valid configuration");
///
/// // Picks up the anti-forgery token of the page.
/// let page = client.page("/post/spirited-away/").await?;
///
/// let state = client.toggle_like(&page.likes()[0].post).await?;
/// println!("{}", state.count_text());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base: Arc<Url>,
    session: Session,
    csrf: Arc<RwLock<CsrfToken>>,
}

// Creation impls
impl Client {
    /// Instantiates a new [`Client`] for the local development address of the site.
    ///
    /// # Panics
    ///
    /// This function will panic if the TLS backend cannot be initialized. For a
    /// safer alternative that returns a `Result` instead of panicking, use the
    /// [`ClientBuilder`].
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        #[expect(
            clippy::expect_used,
            reason = "it is documented that this can panic and that `ClientBuilder` should be used instead for a `Result`"
        )]
        ClientBuilder::new().build().expect("Client::new()")
    }

    /// Returns a [`ClientBuilder`] for creating a custom-configured `Client`.
    #[inline]
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }
}

// Public facing impls
impl Client {
    /// Returns the URL every endpoint is resolved against.
    #[inline]
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Returns if a session was provided.
    #[inline]
    #[must_use]
    pub fn has_session(&self) -> bool {
        !self.session.is_empty()
    }

    /// Returns the anti-forgery token sent with state-changing requests.
    #[inline]
    #[must_use]
    pub fn csrf_token(&self) -> CsrfToken {
        self.csrf.read().clone()
    }

    /// Replaces the anti-forgery token sent with state-changing requests.
    #[inline]
    pub fn set_csrf_token(&self, token: CsrfToken) {
        *self.csrf.write() = token;
    }

    /// Fetches and reads a server-rendered page, e.g. `/post/{slug}/`.
    ///
    /// If the page carries an anti-forgery token, it replaces the one the
    /// client holds.
    pub async fn page(&self, path: &str) -> Result<Page, EndpointError> {
        let url = self.url(path.trim_start_matches('/'))?;

        tracing::debug!(%url, "fetching page");

        let html = send(self.authenticated(self.http.get(url))).await?;
        let page = Page::parse(&html)?;

        if !page.csrf_token().is_empty() {
            self.set_csrf_token(page.csrf_token().clone());
        }

        Ok(page)
    }

    /// Toggles the current user's like on `post`.
    ///
    /// Sends `POST /toggle-like/{slug}/` with the anti-forgery token in a
    /// header and no body.
    ///
    /// # Errors
    ///
    /// - [`ToggleError::Rejected`] if the site answered with `success: false`.
    /// - [`ToggleError::Status`] for a non-success status, e.g. `403` on a
    ///   missing anti-forgery token.
    /// - [`ToggleError::RequestFailed`] if the site could not be reached.
    pub async fn toggle_like(&self, post: &PostRef) -> Result<LikeState, ToggleError> {
        let url = self.url(&format!("toggle-like/{}/", urlencoding::encode(post.slug())))?;

        tracing::debug!(%post, "toggling like");

        let request = self
            .authenticated(self.http.post(url))
            .header(CSRF_HEADER, self.csrf_token().as_str())
            .header("Content-Type", "application/json");

        let response = send(request).await?;

        match serde_json::from_str::<RawLikeResponse>(&response) {
            Ok(response) => LikeState::try_from(response),
            Err(err) => assumption!(
                "failed to deserialize toggle-like response for `{post}`: {err}\n\n{response}"
            ),
        }
    }

    /// Toggles the current user's `kind` reaction on `post`.
    ///
    /// Sends `POST /toggle-reaction/{slug}/` with `reaction_type` and the
    /// anti-forgery token as form fields.
    ///
    /// # Errors
    ///
    /// Same as [`toggle_like`](Self::toggle_like).
    pub async fn toggle_reaction(
        &self,
        post: &PostRef,
        kind: ReactionKind,
    ) -> Result<ReactionState, ToggleError> {
        let url = self.url(&format!(
            "toggle-reaction/{}/",
            urlencoding::encode(post.slug())
        ))?;

        tracing::debug!(%post, %kind, "toggling reaction");

        let csrf = self.csrf_token();
        let form = [("reaction_type", kind.as_str()), (CSRF_FIELD, csrf.as_str())];

        let request = self.authenticated(self.http.post(url)).form(&form);

        let response = send(request).await?;

        match serde_json::from_str::<RawReactionResponse>(&response) {
            Ok(response) => ReactionState::try_from(response),
            Err(err) => assumption!(
                "failed to deserialize toggle-reaction response for `{post}`: {err}\n\n{response}"
            ),
        }
    }

    /// Leaves a comment on `post`, optionally as a reply to comment `parent`.
    ///
    /// # Errors
    ///
    /// - [`CommentError::EmptyComment`] if `content` is blank; nothing is sent.
    /// - [`CommentError::Invalid`] with the site's field errors if the form was
    ///   rejected.
    pub async fn add_comment(
        &self,
        post: &PostRef,
        content: &str,
        parent: Option<u32>,
    ) -> Result<Comment, CommentError> {
        if content.trim().is_empty() {
            return Err(CommentError::EmptyComment);
        }

        let url = self.url(&format!("add-comment/{}/", urlencoding::encode(post.slug())))?;

        tracing::debug!(%post, ?parent, "adding comment");

        let csrf = self.csrf_token();
        let parent = parent.map(|parent| parent.to_string());

        let mut fields = vec![("content", content), (CSRF_FIELD, csrf.as_str())];
        if let Some(parent) = parent.as_deref() {
            fields.push(("parent_id", parent));
        }

        let request = self.authenticated(self.http.post(url)).form(&fields);

        let response = send(request).await?;

        match serde_json::from_str::<RawCommentResponse>(&response) {
            Ok(response) => Comment::try_from(response),
            Err(err) => assumption!(
                "failed to deserialize add-comment response for `{post}`: {err}\n\n{response}"
            ),
        }
    }

    /// Lists the subcategories of category `category`.
    pub async fn subcategories(&self, category: u32) -> Result<Vec<Subcategory>, EndpointError> {
        let mut url = self.url("load-subcategories/")?;
        url.query_pairs_mut()
            .append_pair("category_id", &category.to_string());

        let response = send(self.authenticated(self.http.get(url))).await?;

        match serde_json::from_str::<Vec<RawSubcategory>>(&response) {
            Ok(subcategories) => Ok(subcategories.into_iter().map(Subcategory::from).collect()),
            Err(err) => assumption!(
                "failed to deserialize subcategories for category `{category}`: {err}\n\n{response}"
            ),
        }
    }
}

// Internal impls
impl Client {
    fn url(&self, path: &str) -> Result<Url, Assumption> {
        self.base
            .join(path)
            .assumption(format!("`{path}` should join onto `{}`", self.base))
    }

    fn authenticated(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header("X-Requested-With", "XMLHttpRequest");

        match &self.session.0 {
            Some(session) => request.header("Cookie", format!("sessionid={session}")),
            None => request,
        }
    }
}

/// Sends `request` and returns the body of a success response.
async fn send(request: RequestBuilder) -> Result<String, EndpointError> {
    let response = request.send().await.map_err(RequestError)?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(%status, url = %response.url(), "site responded with a failure status");
        return Err(HttpStatus::new(status.as_u16()).into());
    }

    Ok(response.text().await.map_err(RequestError)?)
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for Client {
    fn toggle_like<'a>(
        &'a self,
        post: &'a PostRef,
    ) -> BoxFuture<'a, Result<LikeState, ToggleError>> {
        Self::toggle_like(self, post).boxed()
    }

    fn toggle_reaction<'a>(
        &'a self,
        post: &'a PostRef,
        kind: ReactionKind,
    ) -> BoxFuture<'a, Result<ReactionState, ToggleError>> {
        Self::toggle_reaction(self, post, kind).boxed()
    }
}

#[derive(Clone, Default)]
pub(crate) struct Session(Option<Arc<str>>);

impl Session {
    #[inline]
    fn new(session: &str) -> Self {
        Self(Some(Arc::from(session)))
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.0.as_ref().is_none_or(|session| session.is_empty())
    }
}

impl Display for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the session itself.
        if self.is_empty() {
            write!(f, "no session")
        } else {
            write!(f, "session")
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}
