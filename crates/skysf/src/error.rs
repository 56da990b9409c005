// We follow the same basic approach as the rest of the crate family: a
// single public `Error` type that wraps a private `ErrorKind`. Each kind of
// error is described by its own (private) struct.
//
// The `skysf_nostd_internal` crate still reports problems with
// `&'static str`s. Those get wrapped here.

use std::path::PathBuf;

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
}

/// The underlying internal error type
#[non_exhaustive]
#[derive(Debug)]
enum ErrorKind {
    /// An error that occurs when the histogram is misconfigured
    BinConfig(BinConfigError),
    /// An error that occurs when a sample maps to a bin index that doesn't
    /// exist
    BinIndexOutOfRange(BinIndexOutOfRangeError),
    /// An error that occurs when the input can't be opened or read
    InputUnavailable(InputUnavailableError),
    /// An error that occurs within `skysf_nostd_internal`
    InternalLegacyAdHoc(InternalLegacyAdHocError),
    /// An error that occurs when an input record can't be parsed
    MalformedRecord(MalformedRecordError),
    /// An error that occurs when the output can't be written
    OutputWrite(OutputWriteError),
    /// An error that occurs when the input holds too few records
    RecordCount(RecordCountError),
}

// define constructor methods for Error
impl Error {
    /// produce an error indicating that the histogram configuration is
    /// invalid
    pub(crate) fn bin_config(what: &'static str) -> Self {
        Error {
            kind: ErrorKind::BinConfig(BinConfigError(what)),
        }
    }

    /// produce an error indicating that a sample was assigned to a bin that
    /// doesn't exist
    pub(crate) fn bin_index_out_of_range(separation: f64, index: usize, n_bins: usize) -> Self {
        Error {
            kind: ErrorKind::BinIndexOutOfRange(BinIndexOutOfRangeError {
                separation,
                index,
                n_bins,
            }),
        }
    }

    /// produce an error indicating that the input couldn't be read
    pub(crate) fn input_unavailable(path: PathBuf, source: std::io::Error) -> Self {
        Error {
            kind: ErrorKind::InputUnavailable(InputUnavailableError { path, source }),
        }
    }

    /// wraps a legacy internal error string
    pub(crate) fn internal_legacy_adhoc(message: &'static str) -> Self {
        Error {
            kind: ErrorKind::InternalLegacyAdHoc(InternalLegacyAdHocError(message)),
        }
    }

    /// produce an error indicating that a line of input couldn't be parsed
    pub(crate) fn malformed_record(line_number: usize, content: String, what: String) -> Self {
        Error {
            kind: ErrorKind::MalformedRecord(MalformedRecordError {
                line_number,
                content,
                what,
            }),
        }
    }

    /// produce an error indicating that the output couldn't be written
    pub(crate) fn output_write(path: PathBuf, source: std::io::Error) -> Self {
        Error {
            kind: ErrorKind::OutputWrite(OutputWriteError { path, source }),
        }
    }

    /// produce an error indicating that the input held fewer records than
    /// requested
    pub(crate) fn record_count(expected: usize, actual: usize) -> Self {
        Error {
            kind: ErrorKind::RecordCount(RecordCountError { expected, actual }),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind {
            ErrorKind::InputUnavailable(ref err) => Some(&err.source),
            ErrorKind::OutputWrite(ref err) => Some(&err.source),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.kind, f)
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            ErrorKind::BinConfig(ref err) => core::fmt::Display::fmt(err, f),
            ErrorKind::BinIndexOutOfRange(ref err) => core::fmt::Display::fmt(err, f),
            ErrorKind::InputUnavailable(ref err) => core::fmt::Display::fmt(err, f),
            ErrorKind::InternalLegacyAdHoc(ref msg) => core::fmt::Display::fmt(msg, f),
            ErrorKind::MalformedRecord(ref err) => core::fmt::Display::fmt(err, f),
            ErrorKind::OutputWrite(ref err) => core::fmt::Display::fmt(err, f),
            ErrorKind::RecordCount(ref err) => core::fmt::Display::fmt(err, f),
        }
    }
}

/// An error that occurs when the histogram is misconfigured (e.g. zero bins
/// or a non-positive bin size)
#[derive(Clone, Debug)]
struct BinConfigError(&'static str);

impl std::error::Error for BinConfigError {}

impl core::fmt::Display for BinConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid bin configuration: {}", self.0)
    }
}

/// An error that occurs when a sample passes the domain predicate but maps
/// to a bin index that doesn't exist
#[derive(Clone, Debug)]
struct BinIndexOutOfRangeError {
    separation: f64,
    index: usize,
    n_bins: usize,
}

impl std::error::Error for BinIndexOutOfRangeError {}

impl core::fmt::Display for BinIndexOutOfRangeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "a separation of {} maps to bin index {}, but there are only {} \
             bins. Consider using the bounded domain policy",
            self.separation, self.index, self.n_bins
        )
    }
}

#[derive(Debug)]
struct InputUnavailableError {
    path: PathBuf,
    source: std::io::Error,
}

impl std::error::Error for InputUnavailableError {}

impl core::fmt::Display for InputUnavailableError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unable to read {}: {}",
            self.path.display(),
            self.source
        )
    }
}

/// A temporary type (that will eventually be eliminated) that wraps the
/// string errors from `skysf_nostd_internal`.
#[derive(Clone)]
struct InternalLegacyAdHocError(&'static str);

impl std::error::Error for InternalLegacyAdHocError {}

impl core::fmt::Display for InternalLegacyAdHocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl core::fmt::Debug for InternalLegacyAdHocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Debug::fmt(&self.0, f)
    }
}

/// An error that occurs when a line doesn't hold 4 floating point values
#[derive(Clone, Debug)]
struct MalformedRecordError {
    line_number: usize,
    content: String,
    what: String,
}

impl std::error::Error for MalformedRecordError {}

impl core::fmt::Display for MalformedRecordError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "malformed record on line {} ({}): {:?}",
            self.line_number, self.what, self.content
        )
    }
}

#[derive(Debug)]
struct OutputWriteError {
    path: PathBuf,
    source: std::io::Error,
}

impl std::error::Error for OutputWriteError {}

impl core::fmt::Display for OutputWriteError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unable to write {}: {}",
            self.path.display(),
            self.source
        )
    }
}

/// An error that occurs when the input holds fewer records than requested
#[derive(Clone, Debug)]
struct RecordCountError {
    expected: usize,
    actual: usize,
}

impl std::error::Error for RecordCountError {}

impl core::fmt::Display for RecordCountError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "expected {} records, but the input only holds {}",
            self.expected, self.actual
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn messages() {
        let err = Error::bin_index_out_of_range(3.0, 3, 3);
        assert!(err.to_string().contains("bin index 3"));
        assert!(err.source().is_none());

        let err = Error::malformed_record(7, "1 2 x 4".to_string(), "bad float".to_string());
        let msg = err.to_string();
        assert!(msg.contains("line 7"));
        assert!(msg.contains("1 2 x 4"));

        let err = Error::record_count(10, 4);
        assert_eq!(
            err.to_string(),
            "expected 10 records, but the input only holds 4"
        );
    }

    #[test]
    fn io_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = Error::input_unavailable(PathBuf::from("points.txt"), io_err);
        assert!(err.to_string().contains("points.txt"));
        assert!(err.source().is_some());
    }
}
