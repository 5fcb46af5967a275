use std::time::Duration;

/// Reads a model descriptor from an http(s) URL or a local path.
pub fn fetch_descriptor(
    location: &str,
    timeout: Duration,
) -> Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>> {
    if location.starts_with("http://") || location.starts_with("https://") {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        let response = client.get(location).send()?.error_for_status()?;
        Ok(response.bytes()?.to_vec())
    } else {
        Ok(std::fs::read(location)?)
    }
}
