//! File system errors

use super::impl_error_constructors;

impl_error_constructors!(
    FileReadFailed as read_failed(path, reason),
    FileWriteFailed as write_failed(path, reason),
    CreateDirFailed as create_dir_failed(path, reason),
    IoError as io_error(message),
);
