//! Vietnamese administrative-division lookup client.
//!
//! Wraps the public provinces API (provinces.open-api.vn shape): a flat
//! province list, plus district and ward lists embedded in `?depth=2`
//! responses. Responses are cached with `moka` (1-hour TTL; the division
//! tree changes a few times a decade). Failures never reach the checkout
//! form: they are logged and the lookup degrades to an empty list.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::Deserialize;
use thiserror::Error;

/// Address lookup errors. Internal only; the public surface degrades to
/// empty lists instead of propagating these.
#[derive(Debug, Error)]
pub enum AddressError {
    #[error("address API request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// One administrative unit (province, district or ward).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddressUnit {
    pub code: u32,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct ProvinceDetail {
    #[serde(default)]
    districts: Vec<AddressUnit>,
}

#[derive(Debug, Deserialize)]
struct DistrictDetail {
    #[serde(default)]
    wards: Vec<AddressUnit>,
}

/// Client for the address lookup API.
#[derive(Clone)]
pub struct AddressClient {
    inner: Arc<AddressClientInner>,
}

struct AddressClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<String, Arc<Vec<AddressUnit>>>,
}

impl AddressClient {
    /// Create a new client against `base_url` (no trailing slash).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(3600))
            .build();

        Self {
            inner: Arc::new(AddressClientInner {
                client: reqwest::Client::new(),
                base_url: base_url.into(),
                cache,
            }),
        }
    }

    /// All provinces. Empty on lookup failure.
    pub async fn provinces(&self) -> Vec<AddressUnit> {
        self.cached("p/".to_string(), |client, url| async move {
            let list: Vec<AddressUnit> =
                client.get(&url).send().await?.error_for_status()?.json().await?;
            Ok(list)
        })
        .await
    }

    /// Districts of the province with `code`. Empty on lookup failure.
    pub async fn districts(&self, code: u32) -> Vec<AddressUnit> {
        self.cached(format!("p/{code}?depth=2"), |client, url| async move {
            let detail: ProvinceDetail =
                client.get(&url).send().await?.error_for_status()?.json().await?;
            Ok(detail.districts)
        })
        .await
    }

    /// Wards of the district with `code`. Empty on lookup failure.
    pub async fn wards(&self, code: u32) -> Vec<AddressUnit> {
        self.cached(format!("d/{code}?depth=2"), |client, url| async move {
            let detail: DistrictDetail =
                client.get(&url).send().await?.error_for_status()?.json().await?;
            Ok(detail.wards)
        })
        .await
    }

    async fn cached<F, Fut>(&self, path: String, fetch: F) -> Vec<AddressUnit>
    where
        F: FnOnce(reqwest::Client, String) -> Fut,
        Fut: Future<Output = Result<Vec<AddressUnit>, AddressError>>,
    {
        if let Some(hit) = self.inner.cache.get(&path).await {
            return hit.as_ref().clone();
        }

        let url = format!("{}/{}", self.inner.base_url, path);
        match fetch(self.inner.client.clone(), url).await {
            Ok(units) => {
                self.inner
                    .cache
                    .insert(path, Arc::new(units.clone()))
                    .await;
                units
            }
            Err(err) => {
                tracing::error!(path, %err, "address lookup failed");
                Vec::new()
            }
        }
    }
}

impl std::fmt::Debug for AddressClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddressClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_unit_decodes_api_shape() {
        let raw = r#"{"name":"Thành phố Hà Nội","code":1,"division_type":"thành phố trung ương"}"#;
        let unit: AddressUnit = serde_json::from_str(raw).unwrap();
        assert_eq!(unit.code, 1);
        assert_eq!(unit.name, "Thành phố Hà Nội");
    }

    #[test]
    fn test_province_detail_embeds_districts() {
        let raw = r#"{"name":"Thành phố Hà Nội","code":1,"districts":[{"name":"Quận Ba Đình","code":1}]}"#;
        let detail: ProvinceDetail = serde_json::from_str(raw).unwrap();
        assert_eq!(detail.districts.len(), 1);
        assert_eq!(detail.districts[0].name, "Quận Ba Đình");
    }

    #[test]
    fn test_district_detail_missing_wards_defaults_empty() {
        let detail: DistrictDetail = serde_json::from_str(r#"{"name":"Quận Ba Đình","code":1}"#).unwrap();
        assert!(detail.wards.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_api_degrades_to_empty() {
        let client = AddressClient::new("http://127.0.0.1:1");
        assert!(client.provinces().await.is_empty());
        assert!(client.districts(1).await.is_empty());
        assert!(client.wards(1).await.is_empty());
    }
}
