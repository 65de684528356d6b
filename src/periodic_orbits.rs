//! # JPL periodic orbit catalog
//!
//! Queries the JPL three-body periodic orbit database
//! (`https://ssd-api.jpl.nasa.gov/periodic_orbits.api`) for one orbit family and
//! saves the JSON answer as is, pretty-printed with the server's key order.
//! The initial states it contains are the usual source of the trajectories turned
//! into kernels by [`crate::pipeline`].
//!
//! The download needs the `jpl-download` feature. One GET is issued, with no retry,
//! pagination or validation of the returned document.
//!
//! ```rust, ignore
//! use camino::Utf8Path;
//! use mkspk_setup::periodic_orbits::PeriodicOrbitQuery;
//!
//! let query = PeriodicOrbitQuery::new("sun", "earth", "halo").with_libration_point(2);
//! query.fetch_to_file(Utf8Path::new("sun_earth_l2_halo.json"))?;
//! ```
use camino::Utf8Path;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::info;

use crate::mkspk_errors::MkspkError;

pub const PERIODIC_ORBITS_API: &str = "https://ssd-api.jpl.nasa.gov/periodic_orbits.api";

/// Selection of an orbit family in the catalog.
///
/// Fields
/// -----------------
/// * `body1`, `body2` – Primaries of the system, e.g. `"earth"` and `"moon"`.
/// * `family` – Family name, e.g. `"halo"`, `"lyapunov"`, `"dro"`.
/// * `libration_point` – Libration point index, for the families built around one.
/// * `branch` – Branch of the family (e.g. `"N"` / `"S"` for halo orbits).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodicOrbitQuery {
    pub body1: String,
    pub body2: String,
    pub family: String,
    pub libration_point: Option<u8>,
    pub branch: Option<String>,
}

impl Default for PeriodicOrbitQuery {
    fn default() -> Self {
        PeriodicOrbitQuery::new("sun", "earth", "halo").with_libration_point(2)
    }
}

impl PeriodicOrbitQuery {
    pub fn new(body1: &str, body2: &str, family: &str) -> Self {
        PeriodicOrbitQuery {
            body1: body1.to_string(),
            body2: body2.to_string(),
            family: family.to_string(),
            libration_point: None,
            branch: None,
        }
    }

    pub fn with_libration_point(mut self, libration_point: u8) -> Self {
        self.libration_point = Some(libration_point);
        self
    }

    pub fn with_branch(mut self, branch: &str) -> Self {
        self.branch = Some(branch.to_string());
        self
    }

    /// Full request URL.
    pub fn url(&self) -> String {
        let mut url = format!(
            "{PERIODIC_ORBITS_API}?sys={}-{}&family={}",
            self.body1, self.body2, self.family
        );
        if let Some(libr) = self.libration_point {
            url.push_str(&format!("&libr={libr}"));
        }
        if let Some(branch) = &self.branch {
            url.push_str(&format!("&branch={branch}"));
        }
        url
    }

    /// Download the family and write it to `path`.
    ///
    /// Return
    /// ----------
    /// * [`MkspkError::ReqwestError`] if the request fails or the answer is not JSON.
    /// * [`MkspkError::Io`] if the file cannot be written.
    #[cfg(feature = "jpl-download")]
    pub fn fetch_to_file(&self, path: &Utf8Path) -> Result<(), MkspkError> {
        let url = self.url();
        info!(%url, "Querying periodic orbit catalog");

        let runtime = tokio::runtime::Runtime::new()
            .map_err(|e| MkspkError::io("start the download runtime for", path, e))?;
        let document = runtime.block_on(async {
            let response = reqwest::get(&url).await?;
            response.json::<serde_json::Value>().await
        })?;

        write_pretty_json(path, &document)
    }
}

/// Write `document` as JSON indented with four spaces.
pub fn write_pretty_json<T: Serialize>(path: &Utf8Path, document: &T) -> Result<(), MkspkError> {
    let mut buffer = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    document.serialize(&mut serializer)?;

    std::fs::write(path, buffer).map_err(|e| MkspkError::io("write catalog file", path, e))?;
    info!(%path, "Saved to file");
    Ok(())
}
