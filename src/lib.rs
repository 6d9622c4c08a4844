pub mod read;

pub use read::{
    read_data_lines, read_sales_data, read_sales_data_with, report_outcome, CandidateEncoding,
    DecodedLines, ReadError, ReaderOptions,
};
