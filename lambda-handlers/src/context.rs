/// Per-invocation metadata supplied by the Lambda runtime.
///
/// Read-only for the duration of one invocation. Adapters hand every
/// computation its own clone, so nothing here is shared for writing between
/// in-flight invocations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    /// AWS request id of this invocation.
    pub request_id: String,
    /// Invocation deadline, milliseconds since the unix epoch.
    pub deadline: u64,
    /// ARN of the function being invoked.
    pub invoked_function_arn: String,
    /// X-Ray trace id, when tracing is active.
    pub xray_trace_id: Option<String>,
}
