use crate::types::FeedbackResponse;

/// A yes/no test applied to one response while narrowing a list
pub trait ResponsePredicate {
    fn matches(&self, response: &FeedbackResponse) -> bool;

    /// Keep the responses that pass, preserving their relative order
    fn retain<'a, I>(&self, responses: I) -> Vec<&'a FeedbackResponse>
    where
        I: IntoIterator<Item = &'a FeedbackResponse>,
        Self: Sized,
    {
        responses
            .into_iter()
            .filter(|response| self.matches(response))
            .collect()
    }
}

/// Trait for configuration validation
pub trait ConfigValidator {
    type Config;

    fn validate(&self, config: &Self::Config) -> crate::error::Result<()>;
}
