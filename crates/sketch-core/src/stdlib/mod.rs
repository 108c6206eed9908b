//! Standard-library modules loaded through `import`. Each module is a set
//! of native bindings plus optional Sketch source ending in `export-as`.

pub mod file;
pub mod queue;
pub mod regex;
pub mod string;
