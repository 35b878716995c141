mod response;
mod text;

pub use response::{map_cmd_result_to_json, print_json_result};
pub use text::{print_text_result, TextReport};
