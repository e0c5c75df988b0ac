pub mod response;

pub use response::UploadResult;
