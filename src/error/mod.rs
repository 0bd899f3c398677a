mod relay;

pub use relay::RelayError;

pub trait IsRetryable {
    fn is_retryable(&self) -> bool;
}
