//! # Jenkins HTTP Client
//!
//! The concrete [`JenkinsApi`] implementation, speaking the server's REST
//! interface over blocking HTTP with basic authentication.
//!
//! Endpoints used:
//!
//! - list job names: `GET {base}/api/json?tree=jobs[name]`
//! - fetch a job configuration: `GET {base}/job/{name}/config.xml`
//! - create a job: `POST {base}/createItem?name={name}`
//! - reconfigure a job: `POST {base}/job/{name}/config.xml`
//! - delete a job: `POST {base}/job/{name}/doDelete`
//!
//! HTTP error statuses surface as [`Error::Transport`] so the publisher's
//! retry classification sees the raw status code; connection-level failures
//! (DNS, refused, timeout) surface as [`Error::Network`].

use crate::error::{Error, Result};
use crate::publisher::JenkinsApi;
use reqwest::blocking::{Client, RequestBuilder, Response};
use std::time::Duration;

/// A connection to one Jenkins server.
pub struct JenkinsClient {
    base_url: String,
    username: String,
    password: String,
    client: Client,
}

impl JenkinsClient {
    /// Create a client for the given server URL and credentials.
    pub fn new(url: &str, username: &str, password: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| Error::Network {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(JenkinsClient {
            base_url: url.trim_end_matches('/').to_string(),
            username: username.to_string(),
            password: password.to_string(),
            client,
        })
    }

    fn send(&self, url: &str, request: RequestBuilder) -> Result<Response> {
        let response = request
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .map_err(|e| Error::Network {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(Error::Transport {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string(),
            })
        }
    }

    fn job_url(&self, name: &str, tail: &str) -> String {
        format!("{}/job/{}/{}", self.base_url, name, tail)
    }
}

impl JenkinsApi for JenkinsClient {
    fn list_job_names(&mut self) -> Result<Vec<String>> {
        let url = format!("{}/api/json", self.base_url);
        let response = self.send(
            &url,
            self.client.get(&url).query(&[("tree", "jobs[name]")]),
        )?;
        let body: serde_json::Value = response.json().map_err(|e| Error::Network {
            url: url.clone(),
            message: e.to_string(),
        })?;
        let jobs = body["jobs"].as_array().cloned().unwrap_or_default();
        Ok(jobs
            .iter()
            .filter_map(|job| job["name"].as_str().map(str::to_string))
            .collect())
    }

    fn job_config(&mut self, name: &str) -> Result<String> {
        let url = self.job_url(name, "config.xml");
        match self.send(&url, self.client.get(&url)) {
            Ok(response) => response.text().map_err(|e| Error::Network {
                url,
                message: e.to_string(),
            }),
            Err(Error::Transport { status: 404, .. }) => Err(Error::JobNotFound {
                name: name.to_string(),
            }),
            Err(error) => Err(error),
        }
    }

    fn create_job(&mut self, name: &str, xml: &str) -> Result<()> {
        let url = format!("{}/createItem", self.base_url);
        self.send(
            &url,
            self.client
                .post(&url)
                .query(&[("name", name)])
                .header(reqwest::header::CONTENT_TYPE, "application/xml")
                .body(xml.to_string()),
        )?;
        Ok(())
    }

    fn reconfigure_job(&mut self, name: &str, xml: &str) -> Result<()> {
        let url = self.job_url(name, "config.xml");
        self.send(
            &url,
            self.client
                .post(&url)
                .header(reqwest::header::CONTENT_TYPE, "application/xml")
                .body(xml.to_string()),
        )?;
        Ok(())
    }

    fn delete_job(&mut self, name: &str) -> Result<()> {
        let url = self.job_url(name, "doDelete");
        self.send(&url, self.client.post(&url))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = JenkinsClient::new("http://jenkins.example/", "user", "pass").unwrap();
        assert_eq!(
            client.job_url("space-main", "config.xml"),
            "http://jenkins.example/job/space-main/config.xml"
        );
    }
}
