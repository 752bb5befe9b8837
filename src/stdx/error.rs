use thiserror::Error;

macro_rules! assumption {
    ($msg:literal $(, $args:expr)* ) => {{
        return Err($crate::stdx::error::Assumption::from( format!($msg $(, $args)*)).into());
    }};
    ($err:expr) => {{
        return Err($crate::stdx::error::Assumption::from( format!("{}", $err)).into());
    }};
    ($cond:expr, $msg:literal $(, $args:expr)* ) => {{
        if !$cond {
        return Err($crate::stdx::error::Assumption::from( format!("`{}`, {}", stringify!($cond), format!($msg $(, $args)*))).into());
        }
    }};
}

pub(crate) use assumption;

/// Represents assumptions about the review site that turned out to be wrong.
///
/// If this is returned, either the site changed what it renders or responds
/// with, or there is a bug in this library.
///
/// # Use
///
/// Only used when interacting with the site, as opposed to input data that
/// might be passed to the library. A malformed JSON reply or a broken markup
/// contract ends up here.
#[derive(Debug, Error)]
#[error("assumption violated: {0}")]
pub struct Assumption(String);

impl From<String> for Assumption {
    #[inline]
    fn from(msg: String) -> Self {
        Self(msg)
    }
}

pub trait Assume<T> {
    type Output;

    fn assumption(self, msg: impl Into<String>) -> Self::Output;
}

impl<T> Assume<T> for Option<T> {
    type Output = Result<T, Assumption>;

    #[inline]
    fn assumption(self, msg: impl Into<String>) -> Self::Output {
        self.ok_or_else(|| Assumption(msg.into()))
    }
}

impl<T, E> Assume<T> for Result<T, E> {
    type Output = Result<T, Assumption>;

    #[inline]
    fn assumption(self, msg: impl Into<String>) -> Self::Output {
        self.map_err(|_err: _| Assumption(msg.into()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn bail() -> Result<(), Assumption> {
        assumption!("failed to uphold assumption");
    }

    fn bail_on_condition(counts: &[u32]) -> Result<(), Assumption> {
        assumption!(
            !counts.is_empty(),
            "reaction counts should not be empty, but was {}",
            counts.len()
        );
        Ok(())
    }

    #[test]
    fn should_bail_with_message() {
        let err = bail().unwrap_err();
        assert_eq!(
            "assumption violated: failed to uphold assumption",
            err.to_string()
        );
    }

    #[test]
    fn should_bail_on_condition_fail_with_message() {
        let err = bail_on_condition(&[]).unwrap_err();
        assert_eq!(
            "assumption violated: `!counts.is_empty()`, reaction counts should not be empty, but was 0",
            err.to_string()
        );

        assert!(bail_on_condition(&[1]).is_ok());
    }

    #[test]
    fn should_error_with_assumption_on_none() {
        let none: Option<()> = None;
        let err = none
            .assumption("failed to find `.likes-count` on review page")
            .unwrap_err();
        assert_eq!(
            "assumption violated: failed to find `.likes-count` on review page",
            err.to_string()
        );
    }

    #[test]
    fn should_pass_through_ok() {
        let ok: Result<u32, &str> = Ok(3);
        assert_eq!(3, ok.assumption("should not fail").unwrap());
    }
}
