pub type MarqueeResult<T> = Result<T, MarqueeError>;

#[derive(thiserror::Error, Debug)]
pub enum MarqueeError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("animation error: {0}")]
    Animation(String),

    #[error("navigation error: {0}")]
    Navigation(String),

    #[error("asset error: {0}")]
    Asset(String),

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MarqueeError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    pub fn navigation(msg: impl Into<String>) -> Self {
        Self::Navigation(msg.into())
    }

    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            MarqueeError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            MarqueeError::animation("x")
                .to_string()
                .contains("animation error:")
        );
        assert!(
            MarqueeError::navigation("x")
                .to_string()
                .contains("navigation error:")
        );
        assert!(MarqueeError::asset("x").to_string().contains("asset error:"));
        assert!(
            MarqueeError::config("x")
                .to_string()
                .contains("config error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = MarqueeError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
