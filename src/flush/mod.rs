mod json;
mod jsonl;

pub use json::{LoadError, from_json, load_from_path, save_to_path, to_json};
pub use jsonl::{export_history_jsonl, export_log_jsonl};
