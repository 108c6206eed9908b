use std::fmt;

use thiserror::Error;

pub const ERROR_TAG: &str = "\x1b[31m[ERROR]\x1b[0m";

/// One entry in the call stack printed with an error: the name of a function
/// whose frame was live when the error was raised.
#[derive(Clone, Debug, Default)]
pub struct StackFrame {
    pub function: String,
}

#[derive(Clone, Debug, Default)]
pub struct ErrorContext {
    pub stack: Vec<StackFrame>,
}

impl ErrorContext {
    fn set_stack(&mut self, stack: Vec<StackFrame>) {
        if self.stack.is_empty() && !stack.is_empty() {
            self.stack = stack;
        }
    }
}

#[derive(Clone, Debug)]
pub struct ErrorData {
    pub message: String,
    pub context: ErrorContext,
}

impl ErrorData {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }
}

impl fmt::Display for ErrorData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[derive(Error, Debug, Clone)]
pub enum SketchError {
    #[error("{0}")]
    UnboundSymbol(ErrorData),

    #[error("Arity mismatch: {0}")]
    Arity(ErrorData),

    #[error("Type mismatch: {0}")]
    TypeMismatch(ErrorData),

    #[error("Parse error: {0}")]
    Parse(ErrorData),

    #[error("Module error: {0}")]
    Module(ErrorData),

    #[error("IO error: {0}")]
    Io(ErrorData),

    #[error("{0}")]
    Runtime(ErrorData),

    /// Not a failure: the input was a single comment. The REPL catches this
    /// and prints nothing.
    #[error("read comment")]
    ReadComment,
}

impl SketchError {
    pub fn unbound_symbol(message: impl Into<String>) -> Self {
        SketchError::UnboundSymbol(ErrorData::new(message))
    }

    pub fn arity(message: impl Into<String>) -> Self {
        SketchError::Arity(ErrorData::new(message))
    }

    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        SketchError::TypeMismatch(ErrorData::new(format!(
            "expected {}, got {}",
            expected.into(),
            actual.into()
        )))
    }

    pub fn type_mismatch_msg(message: impl Into<String>) -> Self {
        SketchError::TypeMismatch(ErrorData::new(message))
    }

    pub fn parse(message: impl Into<String>) -> Self {
        SketchError::Parse(ErrorData::new(message))
    }

    pub fn module(message: impl Into<String>) -> Self {
        SketchError::Module(ErrorData::new(message))
    }

    pub fn io(message: impl Into<String>) -> Self {
        SketchError::Io(ErrorData::new(message))
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        SketchError::Runtime(ErrorData::new(message))
    }

    pub fn with_stack(mut self, stack: Vec<StackFrame>) -> Self {
        if let Some(ctx) = self.context_mut() {
            ctx.set_stack(stack);
        }
        self
    }

    pub fn stack(&self) -> &[StackFrame] {
        self.context_ref()
            .map(|ctx| ctx.stack.as_slice())
            .unwrap_or(&[])
    }

    fn context_ref(&self) -> Option<&ErrorContext> {
        match self {
            SketchError::UnboundSymbol(data)
            | SketchError::Arity(data)
            | SketchError::TypeMismatch(data)
            | SketchError::Parse(data)
            | SketchError::Module(data)
            | SketchError::Io(data)
            | SketchError::Runtime(data) => Some(&data.context),
            SketchError::ReadComment => None,
        }
    }

    fn context_mut(&mut self) -> Option<&mut ErrorContext> {
        match self {
            SketchError::UnboundSymbol(data)
            | SketchError::Arity(data)
            | SketchError::TypeMismatch(data)
            | SketchError::Parse(data)
            | SketchError::Module(data)
            | SketchError::Io(data)
            | SketchError::Runtime(data) => Some(&mut data.context),
            SketchError::ReadComment => None,
        }
    }
}

/// Renders an error the way the CLI prints it: the tagged message, then the
/// call stack with the deepest frame last.
pub fn format_error(err: &SketchError) -> Vec<String> {
    let mut lines = vec![format!("{} {}", ERROR_TAG, err)];
    let stack = err.stack();
    if !stack.is_empty() {
        lines.push(String::new());
        lines.push("Call stack:".to_string());
        for frame in stack.iter().rev() {
            lines.push(format!("  {}", frame.function));
        }
    }
    lines
}

impl From<std::io::Error> for SketchError {
    fn from(err: std::io::Error) -> Self {
        SketchError::io(err.to_string())
    }
}
