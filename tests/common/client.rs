//! HTTP client for the archive routes

#![allow(dead_code)] // Not every test file uses every route

use super::constants::*;
use reqwest::Response;
use std::time::Duration;

pub struct TestClient {
    pub client: reqwest::Client,
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("Request failed")
    }

    pub async fn get_home(&self) -> Response {
        self.get("/").await
    }

    pub async fn get_update_archive(&self) -> Response {
        self.get("/update-archive").await
    }

    pub async fn get_artist(&self, artist: &str) -> Response {
        self.get(&format!("/artists/{}", artist)).await
    }

    pub async fn get_concerts(&self, artist: &str, year: Option<&str>) -> Response {
        match year {
            Some(year) => {
                self.get(&format!("/artists/{}/concerts?year={}", artist, year))
                    .await
            }
            None => self.get(&format!("/artists/{}/concerts", artist)).await,
        }
    }

    pub async fn get_upcoming_concerts(&self, artist: &str, limit: Option<usize>) -> Response {
        match limit {
            Some(limit) => {
                self.get(&format!(
                    "/artists/{}/upcoming?limit={}",
                    artist, limit
                ))
                .await
            }
            None => {
                self.get(&format!("/artists/{}/upcoming", artist))
                    .await
            }
        }
    }

    pub async fn get_concert(&self, artist: &str, concert: &str) -> Response {
        self.get(&format!("/artists/{}/concerts/{}", artist, concert))
            .await
    }

    pub async fn get_songs(&self, artist: &str) -> Response {
        self.get(&format!("/artists/{}/songs", artist)).await
    }

    pub async fn get_song(&self, artist: &str, song: &str) -> Response {
        self.get(&format!("/artists/{}/songs/{}", artist, song)).await
    }

    pub async fn get_eras(&self, artist: &str) -> Response {
        self.get(&format!("/artists/{}/eras", artist)).await
    }

    pub async fn get_era(&self, artist: &str, era: &str) -> Response {
        self.get(&format!("/artists/{}/eras/{}", artist, era)).await
    }
}
