//! Download of the cached base dependency bundle.
//!
//! Any failure to obtain the bundle (network error, HTTP error status,
//! interrupted body) is a cache miss: the caller rebuilds the dependencies
//! from source. A bundle that downloads fine but cannot be extracted is a
//! real error.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use tempfile::NamedTempFile;
use url::Url;

use crate::ops::deps_archive::base_deps_archive_name;
use crate::util::{CiContext, Shell, Status};

/// Result of looking up the cached bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The bundle was downloaded and extracted into the home directory.
    Hit,
    /// No usable bundle; dependencies must be built.
    Miss,
}

/// URL of a file in the remote CI cache.
pub fn cache_url(ctx: &CiContext, name: &str) -> Result<Url> {
    let base_url = &ctx.settings().remote.base_url;
    let base = Url::parse(base_url).with_context(|| format!("invalid base URL: {}", base_url))?;
    base.join(name)
        .with_context(|| format!("failed to build URL for {}", name))
}

/// Fetch the base dependency bundle and extract it into the home directory.
pub fn fetch_base_deps(ctx: &CiContext, shell: &Shell) -> Result<FetchOutcome> {
    let name = base_deps_archive_name(ctx);
    let url = cache_url(ctx, &name)?;

    let span = shell.span(Status::Fetching, &name);
    let Some(download) = download(&url) else {
        shell.status(Status::Skipped, format!("cannot get {}, building dependencies", name));
        return Ok(FetchOutcome::Miss);
    };

    extract_tarball(download.path(), ctx.home())
        .with_context(|| format!("failed to extract {}", name))?;
    span.finish();
    Ok(FetchOutcome::Hit)
}

/// Download `url` into a temporary file. `None` on any failure.
fn download(url: &Url) -> Option<NamedTempFile> {
    match try_download(url) {
        Ok(file) => Some(file),
        Err(e) => {
            tracing::info!("cache miss for {}: {:#}", url, e);
            None
        }
    }
}

fn try_download(url: &Url) -> Result<NamedTempFile> {
    let mut response = reqwest::blocking::get(url.clone())
        .with_context(|| format!("failed to download {}", url))?
        .error_for_status()?;

    let mut file = NamedTempFile::new().context("failed to create temporary file")?;
    response
        .copy_to(&mut file)
        .with_context(|| format!("failed to read response body of {}", url))?;
    Ok(file)
}

/// Extract a gzip-compressed tarball into `dest`.
///
/// Entries that would land outside `dest` are rejected.
pub fn extract_tarball(archive: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive)
        .with_context(|| format!("failed to open {}", archive.display()))?;
    let mut tar = tar::Archive::new(GzDecoder::new(file));
    tar.set_preserve_permissions(true);
    tar.unpack(dest)
        .with_context(|| format!("failed to unpack into {}", dest.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    use super::*;
    use crate::test_support::context_for;
    use crate::util::{CiOptions, Settings};

    fn context_with_base_url(home: &Path, base_url: String) -> CiContext {
        let mut settings = Settings::default();
        settings.remote.base_url = base_url;
        CiContext::new(CiOptions {
            platform: "native_dyn".into(),
            os_name: "linux".into(),
            event_type: "cron".into(),
            home: Some(home.to_path_buf()),
            settings,
            ..Default::default()
        })
        .unwrap()
    }

    /// Serve one canned HTTP response on a local port.
    fn serve_once(response: Vec<u8>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(&response);
            }
        });
        format!("http://{}/ci/", addr)
    }

    #[test]
    fn test_cache_url() {
        let (_home, ctx) = context_for("native_dyn", "cron", "");
        let url = cache_url(&ctx, "base_deps_linux_native_dyn_10.tar.gz").unwrap();
        assert_eq!(
            url.as_str(),
            "http://tmp.kiwix.org/ci/base_deps_linux_native_dyn_10.tar.gz"
        );
    }

    #[test]
    fn test_unreachable_host_is_miss() {
        let tmp = tempfile::TempDir::new().unwrap();
        // Bind then drop to get a port nothing listens on.
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let ctx = context_with_base_url(tmp.path(), format!("http://127.0.0.1:{}/ci/", port));

        assert_eq!(
            fetch_base_deps(&ctx, &Shell::quiet()).unwrap(),
            FetchOutcome::Miss
        );
    }

    #[test]
    fn test_http_404_is_miss() {
        let tmp = tempfile::TempDir::new().unwrap();
        let base_url = serve_once(
            b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_vec(),
        );
        let ctx = context_with_base_url(tmp.path(), base_url);

        assert_eq!(
            fetch_base_deps(&ctx, &Shell::quiet()).unwrap(),
            FetchOutcome::Miss
        );
    }

    #[test]
    fn test_hit_extracts_into_home() {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let mut tar_data = Vec::new();
        {
            let encoder = GzEncoder::new(&mut tar_data, Compression::default());
            let mut builder = tar::Builder::new(encoder);
            let mut header = tar::Header::new_gnu();
            header.set_path("BUILD_native_dyn/INSTALL/lib/libzim.so").unwrap();
            header.set_size(5);
            header.set_mode(0o644);
            header.set_cksum();
            builder
                .append(&header, std::io::Cursor::new(b"hello"))
                .unwrap();
            builder.into_inner().unwrap().finish().unwrap();
        }

        let mut response = format!(
            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            tar_data.len()
        )
        .into_bytes();
        response.extend_from_slice(&tar_data);

        let tmp = tempfile::TempDir::new().unwrap();
        let ctx = context_with_base_url(tmp.path(), serve_once(response));

        assert_eq!(
            fetch_base_deps(&ctx, &Shell::quiet()).unwrap(),
            FetchOutcome::Hit
        );
        let content =
            std::fs::read_to_string(tmp.path().join("BUILD_native_dyn/INSTALL/lib/libzim.so"))
                .unwrap();
        assert_eq!(content, "hello");
    }
}
