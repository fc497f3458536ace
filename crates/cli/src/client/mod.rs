use api_types::fuel_log::{FuelEntry, FuelEntryNew};
use async_trait::async_trait;
use engine::{EngineError, FuelGateway, NewEntry, RawEntry, ResultEngine};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{AppError, Result};

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Gateway backed by the fuel log REST server.
#[derive(Debug, Clone)]
pub struct RemoteGateway {
    base_url: Url,
    http: reqwest::Client,
}

impl RemoteGateway {
    pub fn new(base_url: &str) -> Result<Self> {
        // A trailing slash keeps any path prefix when joining endpoints.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized).map_err(|err| AppError::BaseUrl(err.to_string()))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> ResultEngine<Url> {
        self.base_url
            .join(path)
            .map_err(|err| EngineError::Persistence(format!("invalid endpoint {path}: {err}")))
    }
}

fn transport(err: reqwest::Error) -> EngineError {
    tracing::error!("fuel log server unreachable: {err}");
    EngineError::Persistence(format!("transport error: {err}"))
}

async fn error_message(res: reqwest::Response) -> String {
    res.json::<ErrorResponse>()
        .await
        .map(|err| err.error)
        .unwrap_or_else(|_| "unknown error".to_string())
}

fn raw_entry(entry: FuelEntry) -> RawEntry {
    RawEntry {
        id: entry.id,
        date: entry.date,
        liters: entry.liters,
        total_price: entry.total_price,
        odometer: entry.odometer,
    }
}

#[async_trait]
impl FuelGateway for RemoteGateway {
    /// A server answering with an error status yields an empty log; only an
    /// unreachable server is an error.
    async fn load(&self) -> ResultEngine<Vec<RawEntry>> {
        let res = self
            .http
            .get(self.endpoint("fuel-logs")?)
            .send()
            .await
            .map_err(transport)?;

        if !res.status().is_success() {
            tracing::warn!("loading fuel entries failed with status {}", res.status());
            return Ok(Vec::new());
        }

        let entries = res.json::<Vec<FuelEntry>>().await.map_err(transport)?;
        Ok(entries.into_iter().map(raw_entry).collect())
    }

    async fn add(&self, entry: NewEntry) -> ResultEngine<RawEntry> {
        let odometer = entry.odometer;
        let payload = FuelEntryNew {
            date: entry.date,
            liters: entry.liters,
            total_price: entry.total_price,
            odometer,
        };

        let res = self
            .http
            .post(self.endpoint("fuel-logs")?)
            .json(&payload)
            .send()
            .await
            .map_err(transport)?;

        let status = res.status();
        if status.is_success() {
            return res
                .json::<FuelEntry>()
                .await
                .map(raw_entry)
                .map_err(transport);
        }

        let err = match status {
            StatusCode::CONFLICT => EngineError::DuplicateOdometer(odometer),
            StatusCode::UNPROCESSABLE_ENTITY => EngineError::InvalidEntry(error_message(res).await),
            _ => {
                tracing::error!("adding fuel entry failed: {}", error_message(res).await);
                EngineError::Persistence("failed to add fuel entry".to_string())
            }
        };
        Err(err)
    }

    async fn delete(&self, id: Uuid) -> ResultEngine<()> {
        let res = self
            .http
            .delete(self.endpoint(&format!("fuel-logs/{id}"))?)
            .send()
            .await
            .map_err(transport)?;

        match res.status() {
            status if status.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(EngineError::KeyNotFound(id.to_string())),
            _ => {
                tracing::error!("deleting fuel entry failed: {}", error_message(res).await);
                Err(EngineError::Persistence(
                    "failed to delete fuel entry".to_string(),
                ))
            }
        }
    }
}
