use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::model::table::Table;
use crate::report::ReportError;
use crate::report::html::escape;

pub const DOWNLOAD_FILE_NAME: &str = "data.csv";
const DATA_URI_PREFIX: &str = "data:file/csv;base64,";

pub fn results_csv(results: &Table) -> Result<Vec<u8>, ReportError> {
    Ok(results.to_csv()?)
}

pub fn data_uri(csv: &[u8]) -> String {
    let mut uri = String::with_capacity(DATA_URI_PREFIX.len() + csv.len() * 4 / 3 + 4);
    uri.push_str(DATA_URI_PREFIX);
    STANDARD.encode_string(csv, &mut uri);
    uri
}

pub fn decode_data_uri(uri: &str) -> Option<Vec<u8>> {
    let payload = uri.strip_prefix(DATA_URI_PREFIX)?;
    STANDARD.decode(payload).ok()
}

pub fn download_link(csv: &[u8]) -> String {
    format!(
        "<a href=\"{}\" download=\"{}\">Download results</a>",
        escape(&data_uri(csv)),
        DOWNLOAD_FILE_NAME
    )
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/export.rs"]
mod tests;
