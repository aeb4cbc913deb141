use crate::common::error::ScmSyncError;

/// Result alias used across the crate's outer layers.
///
/// # Examples
///
/// ```
/// use scmsync::common::result::ScmSyncResult;
/// use scmsync::common::error::ScmSyncError;
///
/// fn example_function() -> ScmSyncResult<String> {
///     Ok("success".to_string())
/// }
///
/// fn example_with_error() -> ScmSyncResult<()> {
///     Err(ScmSyncError::config_error("gitlab.groups_url is required", None))
/// }
/// ```
pub type ScmSyncResult<T> = Result<T, ScmSyncError>;

/// Conversion helpers from foreign `Result`s into [`ScmSyncResult`].
pub trait ResultExt<T, E> {
    /// Wrap an I/O failure as a file system error.
    ///
    /// # Examples
    ///
    /// ```
    /// use scmsync::common::result::{ScmSyncResult, ResultExt};
    ///
    /// let result: Result<String, std::io::Error> = Err(std::io::Error::new(
    ///     std::io::ErrorKind::NotFound, "file not found"
    /// ));
    /// let wrapped: ScmSyncResult<String> = result.with_filesystem_error("read failed", None);
    /// assert!(wrapped.is_err());
    /// ```
    fn with_filesystem_error(
        self,
        message: impl Into<String>,
        path: Option<std::path::PathBuf>,
    ) -> ScmSyncResult<T>
    where
        E: Into<std::io::Error>;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn with_filesystem_error(
        self,
        message: impl Into<String>,
        path: Option<std::path::PathBuf>,
    ) -> ScmSyncResult<T>
    where
        E: Into<std::io::Error>,
    {
        self.map_err(|e| ScmSyncError::filesystem_error_with_source(message, path, e.into()))
    }
}
