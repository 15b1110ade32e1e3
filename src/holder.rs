/// Sole owner of one payload value.
///
/// Only the adapter layer reaches the payload, through
/// [`model_get`](crate::model_get).
pub struct Holder<T> {
    value: T,
}

impl<T> Holder<T> {
    pub fn new(value: T) -> Self {
        Holder { value }
    }

    pub fn get(&self) -> &T {
        &self.value
    }
}

#[cfg(feature = "tracing")]
impl<T> Drop for Holder<T> {
    fn drop(&mut self) {
        tracing::trace!(
            payload = std::any::type_name::<T>(),
            "releasing erased payload"
        );
    }
}
