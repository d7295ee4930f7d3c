/// Format whole seconds as `m:ss` (minutes unpadded, seconds two digits)
pub fn format_duration(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
