// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0
#![allow(missing_docs, dead_code)]

//! Test fixtures for the HTTP surface
//!
//! Starts the real server on an OS-assigned port in front of a wiremock
//! UniProt upstream.

use std::net::SocketAddr;

use api::{Server, ServerConfig, ShutdownConfig};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

pub const TEST_MAX_RETRIES: u32 = 2;

/// Running server plus the token that stops it
pub struct TestServer {
    pub addr: SocketAddr,
    pub token: CancellationToken,
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, route: &str) -> String {
        format!("http://{}{route}", self.addr)
    }

    pub async fn get(&self, route: &str) -> reqwest::Response {
        self.client
            .get(self.url(route))
            .send()
            .await
            .expect("Failed to send request")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Start a server whose UniProt upstream is `upstream`
pub async fn start_server(upstream: &MockServer) -> TestServer {
    start_server_with(upstream, |_| {}).await
}

/// Start a server after adjusting its configuration
pub async fn start_server_with(
    upstream: &MockServer,
    adjust: impl FnOnce(&mut ServerConfig),
) -> TestServer {
    let mut config = ServerConfig::for_testing();
    config.uniprot.base_url = upstream.uri();
    config.uniprot.max_retry_attempts = TEST_MAX_RETRIES;
    adjust(&mut config);

    let (addr, token) = Server::new(config, ShutdownConfig::default())
        .expect("Failed to create server")
        .run_for_testing()
        .await
        .expect("Failed to start test server");

    TestServer {
        addr,
        token,
        client: reqwest::Client::new(),
    }
}

pub fn entry_path(accession: &str) -> String {
    format!("/uniprotkb/{accession}.json")
}

pub async fn mount_entry(server: &MockServer, accession: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(entry_path(accession)))
        .respond_with(response)
        .mount(server)
        .await;
}

/// Minimal reviewed entry with one domain and two locations
pub fn kinase_entry() -> Value {
    json!({
        "primaryAccession": "P00533",
        "uniProtkbId": "EGFR_HUMAN",
        "organism": {"scientificName": "Homo sapiens", "commonName": "Human", "taxonId": 9606},
        "proteinDescription": {
            "recommendedName": {"fullName": {"value": "Epidermal growth factor receptor"}}
        },
        "genes": [{"geneName": {"value": "EGFR"}, "synonyms": [{"value": "ERBB"}, {"value": "ERBB1"}]}],
        "comments": [
            {"commentType": "SUBCELLULAR LOCATION", "subcellularLocations": [
                {"location": {"value": "Cell membrane"}},
                {"location": {"value": "Endoplasmic reticulum membrane"}}
            ]}
        ],
        "features": [
            {"type": "Domain", "description": "Protein kinase",
             "location": {"start": {"value": 712}, "end": {"value": 979}}},
            {"type": "Transmembrane", "description": "Helical",
             "location": {"start": {"value": 646}, "end": {"value": 668}}}
        ],
        "uniProtKBCrossReferences": [
            {"database": "PDB", "id": "1IVO", "properties": [{"key": "Method", "value": "X-ray"}]}
        ],
        "sequence": {"value": "MRPSGTAGAALLALLAALCPASRA", "length": 24}
    })
}
