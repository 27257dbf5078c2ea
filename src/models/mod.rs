pub mod batch;
pub mod file_handle;
pub mod loaders;
pub mod operation;
pub mod result;
pub mod split;

pub use batch::{BatchKind, FileBatch};
pub use file_handle::{FileHandle, FileSource};
pub use loaders::{load_all_manifests, load_manifest, JobManifest};
pub use operation::OperationKind;
pub use result::RemoteResult;
pub use split::SplitParameters;
