/// Minimal blocking HTTP seam so archive loading can be tested without a network.
pub trait HttpClient {
    fn execute(&self, req: reqwest::blocking::Request) -> reqwest::Result<reqwest::blocking::Response>;
}
