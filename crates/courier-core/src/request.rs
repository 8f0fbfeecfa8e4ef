//! Request and response value types

use crate::error::CallError;

/// An immutable descriptor of one remote invocation.
///
/// A request names the target service, the method on that service, and an
/// opaque payload. The payload's encoding belongs to the transport and its
/// codec - this layer never inspects it. Created once per call, read-only
/// for the life of the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    service: String,
    method: String,
    payload: Vec<u8>,
}

impl Request {
    /// Create a new request.
    ///
    /// # Errors
    ///
    /// Returns [`CallError::InvalidRequest`] if the service or method name
    /// is empty. Validating here keeps the `Client` contract simple: every
    /// `Request` a client sees is fully populated.
    ///
    /// # Examples
    ///
    /// ```
    /// use courier_core::Request;
    ///
    /// let req = Request::new("greeter", "Greeter.Hello", b"{}".to_vec()).unwrap();
    /// assert_eq!(req.service(), "greeter");
    ///
    /// assert!(Request::new("", "Greeter.Hello", Vec::new()).is_err());
    /// ```
    pub fn new(
        service: impl Into<String>,
        method: impl Into<String>,
        payload: Vec<u8>,
    ) -> Result<Self, CallError> {
        let service = service.into();
        let method = method.into();
        if service.is_empty() {
            return Err(CallError::InvalidRequest(
                "service name must not be empty".to_string(),
            ));
        }
        if method.is_empty() {
            return Err(CallError::InvalidRequest(
                "method name must not be empty".to_string(),
            ));
        }
        Ok(Self {
            service,
            method,
            payload,
        })
    }

    /// The target service name.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// The method name on the target service.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The opaque request payload.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}

/// The opaque response produced by a terminal client.
///
/// Decorators hand this back unchanged; only the caller (or a documented
/// transforming wrapper) interprets the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    payload: Vec<u8>,
}

impl Response {
    /// Create a response carrying `payload`.
    pub fn new(payload: Vec<u8>) -> Self {
        Self { payload }
    }

    /// The opaque response payload.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Consume the response, yielding its payload.
    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_construction() {
        let req = Request::new("svc", "Svc.Method", b"hello".to_vec()).unwrap();
        assert_eq!(req.service(), "svc");
        assert_eq!(req.method(), "Svc.Method");
        assert_eq!(req.payload(), b"hello");
    }

    #[test]
    fn test_empty_service_rejected() {
        let err = Request::new("", "Svc.Method", Vec::new()).unwrap_err();
        assert!(matches!(err, CallError::InvalidRequest(_)));
    }

    #[test]
    fn test_empty_method_rejected() {
        let err = Request::new("svc", "", Vec::new()).unwrap_err();
        assert!(matches!(err, CallError::InvalidRequest(_)));
    }

    #[test]
    fn test_empty_payload_allowed() {
        // Only the names are preconditions; a payload may be empty
        assert!(Request::new("svc", "Svc.Method", Vec::new()).is_ok());
    }
}
