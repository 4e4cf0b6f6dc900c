/// Declares how an error from one layer crosses into another layer's error type.
///
/// The macro expands to a `From` implementation, so the `?` operator performs
/// the conversion at the boundary and no `map_err()` chains are needed inside
/// the pipeline.
///
/// # Syntax
///
/// ```ignore
/// error_boundary!(SourceError => TargetError, |err_var| {
///     // conversion logic returning TargetError
/// });
/// ```
///
/// # Example
///
/// ```
/// use courier_core::error_boundary;
/// use courier_core::EndpointError;
///
/// #[derive(Debug, thiserror::Error)]
/// enum AppError {
///     #[error("endpoint: {0}")]
///     Endpoint(#[source] EndpointError),
///     #[error("json: {0}")]
///     Json(String),
/// }
///
/// error_boundary!(EndpointError => AppError, |e| AppError::Endpoint(e));
/// error_boundary!(serde_json::Error => AppError, |e| AppError::Json(e.to_string()));
///
/// fn load(raw: &str) -> Result<serde_json::Value, AppError> {
///     Ok(serde_json::from_str(raw)?)
/// }
///
/// assert!(matches!(load("{"), Err(AppError::Json(_))));
/// ```
#[macro_export]
macro_rules! error_boundary {
    ($inner:ty => $outer:ty, |$err:ident| $body:expr) => {
        impl ::std::convert::From<$inner> for $outer {
            fn from($err: $inner) -> $outer {
                $body
            }
        }
    };
}
