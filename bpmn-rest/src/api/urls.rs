//! Absolute URLs for resources embedded in responses

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped inside a single path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Builds resource URLs under the configured base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlBuilder {
    base: String,
}

impl UrlBuilder {
    /// `base_url` gets a trailing slash if it lacks one
    pub fn new(base_url: &str) -> Self {
        let mut base = base_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        Self { base }
    }

    fn resource(&self, prefix: &str, segments: &[&str]) -> String {
        let mut url = format!("{}{}", self.base, prefix);
        for segment in segments {
            url.push('/');
            url.extend(utf8_percent_encode(segment, PATH_SEGMENT));
        }
        url
    }

    pub fn historic_process_instance(&self, id: &str) -> String {
        self.resource("history/historic-process-instances", &[id])
    }

    pub fn process_definition(&self, id: &str) -> String {
        self.resource("repository/process-definitions", &[id])
    }

    pub fn task_identity_link(
        &self,
        task_id: &str,
        family: &str,
        identity_id: &str,
        link_type: &str,
    ) -> String {
        self.resource(
            "runtime/tasks",
            &[task_id, "identitylinks", family, identity_id, link_type],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_added() {
        let urls = UrlBuilder::new("http://localhost:8080/service");
        assert_eq!(
            urls.process_definition("invoice:1:4"),
            "http://localhost:8080/service/repository/process-definitions/invoice:1:4"
        );
        assert_eq!(
            UrlBuilder::new("http://localhost:8080/service/"),
            urls
        );
    }

    #[test]
    fn test_identity_link_url() {
        let urls = UrlBuilder::new("http://localhost/");
        assert_eq!(
            urls.task_identity_link("t1", "groups", "sales", "candidate"),
            "http://localhost/runtime/tasks/t1/identitylinks/groups/sales/candidate"
        );
    }

    #[test]
    fn test_segments_are_percent_encoded() {
        let urls = UrlBuilder::new("http://localhost/");
        assert_eq!(
            urls.task_identity_link("t1", "users", "a/b", "candidate"),
            "http://localhost/runtime/tasks/t1/identitylinks/users/a%2Fb/candidate"
        );
        assert_eq!(
            urls.historic_process_instance("pi 1?x#y"),
            "http://localhost/history/historic-process-instances/pi%201%3Fx%23y"
        );
        assert_eq!(
            urls.process_definition("100%"),
            "http://localhost/repository/process-definitions/100%25"
        );
    }
}
