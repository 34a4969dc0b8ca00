/// Kernel-style error numbers used across the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The register window could not be mapped.
    ENODEV,
    /// Invalid argument.
    EINVAL,
    /// A node with this name is already registered.
    EEXIST,
    /// No such attribute node.
    ENOENT,
}
