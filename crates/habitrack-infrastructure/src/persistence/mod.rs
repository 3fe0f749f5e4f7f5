pub mod repositories;
pub mod session_file;

mod result_ext;

pub use result_ext::ResultExt;
pub use session_file::SessionFileStore;
