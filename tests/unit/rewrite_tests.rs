//! Unit tests for path rewriting through the public API

use perfgen::services::rewrite::relative_dest;

#[test]
fn test_mm_files_keep_their_extension() {
    assert_eq!(
        relative_dest("Source/web/mac/ChromeClientMac.mm").unwrap(),
        "renderer/web/mac/chrome_client_mac.mm"
    );
}

#[test]
fn test_already_snake_case_basenames_pass_through() {
    assert_eq!(
        relative_dest("common/frame_policy.h").unwrap(),
        "common/frame_policy.h"
    );
}

#[test]
fn test_cpp_extension_changes_even_when_name_is_lowercase() {
    assert_eq!(
        relative_dest("common/frame_policy.cpp").unwrap(),
        "common/frame_policy.cc"
    );
}

#[test]
fn test_nested_source_directories() {
    assert_eq!(
        relative_dest("Source/core/css/parser/CSSParserContext.cpp").unwrap(),
        "renderer/core/css/parser/css_parser_context.cc"
    );
}

#[test]
fn test_error_message_names_the_path() {
    let err = relative_dest("Tools/Scripts/run-tests").unwrap_err();
    assert!(err.to_string().contains("Tools/Scripts/run-tests"));
}
