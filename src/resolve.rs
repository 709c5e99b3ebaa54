//! Module path to repository URL resolution
//!
//! Each line of `go list -m all` output is resolved on its own:
//! 1. Build the lookup URL: `https://<module path>?go-get=1`
//! 2. GET it and scan the page for the go-import meta tag
//! 3. Accept only git and return the repository URL from the tag
//!
//! For github.com the lookup is collapsed to `github.com/<owner>/<repo>`,
//! since deeper paths there are packages inside a repository.

use crate::http::{Fetch, FetchError};
use crate::scan::{self, ScanError};
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Query that asks a module host for its go-import metadata
const DISCOVERY_QUERY: &str = "go-get=1";

/// The only VCS this tool can report
const SUPPORTED_VCS: &str = "git";

/// Host whose deep paths collapse to owner/repo before lookup
const GITHUB_HOST: &str = "github.com";

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("not a module: {0:?}")]
    NotAModule(String),

    #[error("invalid module path '{path}': {source}")]
    InvalidUrl {
        path: String,
        source: url::ParseError,
    },

    #[error("path error: {0}")]
    PathError(String),

    #[error("unable to GET {url}: {source}")]
    Transport { url: String, source: FetchError },

    #[error("{status}: unable to GET {url}")]
    HttpStatus { status: u16, url: String },

    #[error("{url}: {source}")]
    TagNotFound { url: String, source: ScanError },

    #[error("{url}: unsupported vcs {kind}")]
    UnsupportedVcs { url: String, kind: String },

    #[error("{url}: unable to extract repository URL from go-import tag")]
    Extraction { url: String },
}

/// One record of module-list output: `<module path> [<version> ...]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleLine<'a> {
    pub path: &'a str,
    pub version: Option<&'a str>,
}

impl<'a> ModuleLine<'a> {
    pub fn parse(line: &'a str) -> Result<Self, ResolveError> {
        let mut fields = line.split_whitespace();
        let path = fields
            .next()
            .ok_or_else(|| ResolveError::NotAModule(line.to_string()))?;
        Ok(ModuleLine {
            path,
            version: fields.next(),
        })
    }
}

/// Build the go-import lookup URL for a module path
///
/// Module paths carry no scheme; if one is present anyway it is replaced
/// with https. Any existing query is replaced by `go-get=1`.
pub fn lookup_url(module_path: &str) -> Result<Url, ResolveError> {
    let without_scheme = module_path
        .split_once("://")
        .map_or(module_path, |(_, rest)| rest);

    let mut url = Url::parse(&format!("https://{}", without_scheme)).map_err(|source| {
        ResolveError::InvalidUrl {
            path: module_path.to_string(),
            source,
        }
    })?;
    url.set_query(Some(DISCOVERY_QUERY));
    url.set_fragment(None);

    let (host, segments) = host_and_segments(&url)?;
    if host.eq_ignore_ascii_case(GITHUB_HOST) && segments.len() > 2 {
        // host/owner/repo: the host is the first of the three
        let repo_root = format!("/{}", segments[..2].join("/"));
        url.set_path(&repo_root);
    }

    Ok(url)
}

/// Host plus path segments of a lookup URL
///
/// An https URL always has a host, so `PathError` only guards URLs built
/// some other way.
fn host_and_segments(url: &Url) -> Result<(String, Vec<String>), ResolveError> {
    let Some(host) = url.host_str() else {
        return Err(ResolveError::PathError(url.to_string()));
    };
    let segments = url
        .path_segments()
        .map(|segments| segments.map(str::to_string).collect())
        .unwrap_or_default();
    Ok((host.to_string(), segments))
}

/// Resolve one module-list line to the git repository URL behind it
pub fn resolve<F: Fetch + ?Sized>(fetcher: &F, line: &str) -> Result<String, ResolveError> {
    let module = ModuleLine::parse(line)?;
    let url = lookup_url(module.path)?.to_string();

    debug!(module = module.path, url = %url, "fetching go-import metadata");
    let response = fetcher
        .get(&url)
        .map_err(|source| ResolveError::Transport {
            url: url.clone(),
            source,
        })?;

    if response.status != 200 {
        return Err(ResolveError::HttpStatus {
            status: response.status,
            url,
        });
    }

    let fields = match scan::scan_for_discovery_tag(response.body) {
        Ok(fields) => fields,
        Err(source) => return Err(ResolveError::TagNotFound { url, source }),
    };
    debug!(url = %url, content = ?fields, "found go-import tag");

    repo_from_fields(url, fields)
}

/// Validate go-import content fields and pick out the repository URL
fn repo_from_fields(url: String, mut fields: Vec<String>) -> Result<String, ResolveError> {
    if fields.len() < 3 {
        return Err(ResolveError::Extraction { url });
    }
    if fields[1] != SUPPORTED_VCS {
        return Err(ResolveError::UnsupportedVcs {
            url,
            kind: fields.swap_remove(1),
        });
    }
    Ok(fields.swap_remove(2))
}
