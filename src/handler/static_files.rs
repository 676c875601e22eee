//! Static file serving module
//!
//! Serves the front-end assets verbatim from the configured directory under
//! its mount path, with `ETag` validation.

use crate::config::StaticFilesConfig;
use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use percent_encoding::percent_decode_str;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Whether `path` falls under `mount_path` (e.g. `/static` or `/static/...`)
pub fn is_mounted(path: &str, mount_path: &str) -> bool {
    let mount = mount_path.trim_end_matches('/');
    path == mount
        || path
            .strip_prefix(mount)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Serve a file from the static directory
pub async fn serve_static(
    ctx: &RequestContext<'_>,
    config: &StaticFilesConfig,
) -> Response<Full<Bytes>> {
    let Some(relative) = relative_path(ctx.path, &config.mount_path) else {
        logger::log_warning(&format!("Rejected static path: {}", ctx.path));
        return http::build_404_response();
    };

    match load_from_directory(&config.dir, &relative, &config.index_files).await {
        Some((content, content_type)) => {
            let etag = cache::generate_etag(&content);
            if cache::check_etag_match(ctx.if_none_match, &etag) {
                return http::build_304_response(&etag);
            }
            http::build_cached_response(Bytes::from(content), content_type, &etag, ctx.is_head)
        }
        None => http::build_404_response(),
    }
}

/// Decoded path below the mount, made only of normal components.
///
/// Returns `None` for `..`, absolute or otherwise escaping paths.
fn relative_path(path: &str, mount_path: &str) -> Option<PathBuf> {
    let rest = path.strip_prefix(mount_path.trim_end_matches('/'))?;
    let decoded = percent_decode_str(rest).decode_utf8().ok()?;

    let mut relative = PathBuf::new();
    for component in Path::new(decoded.trim_start_matches('/')).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(relative)
}

/// Load a file below `static_dir`, falling back to index files for directories
async fn load_from_directory(
    static_dir: &str,
    relative: &Path,
    index_files: &[String],
) -> Option<(Vec<u8>, &'static str)> {
    let static_dir_canonical = match fs::canonicalize(static_dir).await {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Static directory not found or inaccessible '{static_dir}': {e}"
            ));
            return None;
        }
    };

    let mut file_path = static_dir_canonical.join(relative);
    if file_path.is_dir() {
        file_path = index_files
            .iter()
            .map(|index| file_path.join(index))
            .find(|candidate| candidate.is_file())?;
    }

    // Missing files are a plain 404, not worth a warning
    let file_path_canonical = fs::canonicalize(&file_path).await.ok()?;
    if !file_path_canonical.starts_with(&static_dir_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            relative.display(),
            file_path_canonical.display()
        ));
        return None;
    }

    let content = match fs::read(&file_path_canonical).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {}",
                file_path_canonical.display(),
                e
            ));
            return None;
        }
    };

    let content_type = mime::get_content_type(file_path.extension().and_then(|e| e.to_str()));
    Some((content, content_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_mounted() {
        assert!(is_mounted("/static", "/static"));
        assert!(is_mounted("/static/app.js", "/static"));
        assert!(is_mounted("/static/app.js", "/static/"));
        assert!(!is_mounted("/staticfiles/app.js", "/static"));
        assert!(!is_mounted("/activities", "/static"));
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(
            relative_path("/static/css/site.css", "/static"),
            Some(PathBuf::from("css/site.css"))
        );
        assert_eq!(relative_path("/static", "/static"), Some(PathBuf::new()));
        assert_eq!(
            relative_path("/static/my%20page.html", "/static"),
            Some(PathBuf::from("my page.html"))
        );
        assert_eq!(relative_path("/static/../secret.txt", "/static"), None);
        assert_eq!(relative_path("/static/%2e%2e/secret.txt", "/static"), None);
    }

    #[tokio::test]
    async fn test_load_index_for_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>Activities</h1>").unwrap();

        let (content, content_type) = load_from_directory(
            dir.path().to_str().unwrap(),
            Path::new(""),
            &["index.html".to_string()],
        )
        .await
        .unwrap();
        assert_eq!(content, b"<h1>Activities</h1>");
        assert_eq!(content_type, "text/html; charset=utf-8");
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_from_directory(
            dir.path().to_str().unwrap(),
            Path::new("nope.js"),
            &[]
        )
        .await
        .is_none());
        assert!(load_from_directory("/definitely/not/here", Path::new("a.js"), &[])
            .await
            .is_none());
    }
}
