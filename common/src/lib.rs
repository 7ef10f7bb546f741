//! Plant ID Common Library
//!
//! CLIと将来のフロントエンドで共有される型とユーティリティ。
//! ネットワーク・ファイルI/Oは含まない。

pub mod error;
pub mod gemini;
pub mod normalizer;
pub mod parser;
pub mod prompts;
pub mod types;
pub mod validation;

pub use error::{IdentifyError, Result};
pub use gemini::{
    build_request, effective_mime_type, encode_image, endpoint_url, extract_completion_text,
    extract_error_message, to_data_url, GeminiRequest, GenerationConfig, DEFAULT_API_BASE,
    DEFAULT_MIME_TYPE, DEFAULT_MODEL,
};
pub use normalizer::normalize_identification;
pub use parser::{parse_completion_json, parse_identification_response, strip_code_fence};
pub use prompts::{build_identification_prompt, DEFAULT_LOCAL_LANGUAGE};
pub use types::{confidence_label, ConfidenceTier, IdentificationResult};
pub use validation::{
    validate_image, ValidationError, ALLOWED_MIME_TYPES, MAX_FILE_SIZE_BYTES, MAX_FILE_SIZE_MB,
};
