use crate::error::{AppError, AppResult};
use crate::logging::{log, LogLevel};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tokio::task;

const JSON_INDENT: &[u8] = b"    ";

fn map_io_error(error: std::io::Error, path: &Path) -> AppError {
    AppError::Io(format!("I/O error at path '{}': {}", path.display(), error))
}

/// Pretty JSON with four-space indentation.
pub fn to_json_bytes<T: Serialize + ?Sized>(data: &T) -> AppResult<Vec<u8>> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(JSON_INDENT));
    data.serialize(&mut ser)?;
    Ok(buf)
}

fn temp_sibling(fpath: &Path) -> PathBuf {
    let name = fpath
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    fpath.with_file_name(format!(".{}.tmp", name))
}

async fn write_file_async(fpath: &Path, data: &[u8]) -> AppResult<()> {
    let mut file = File::create(fpath)
        .await
        .map_err(|e| map_io_error(e, fpath))?;
    file.write_all(data)
        .await
        .map_err(|e| map_io_error(e, fpath))?;
    file.sync_all()
        .await
        .map_err(|e| map_io_error(e, fpath))?;
    Ok(())
}

/// Writes next to the target and renames over it, so readers see either the
/// old file or the complete new one.
async fn write_atomic(fpath: &Path, data: &[u8]) -> AppResult<()> {
    if let Some(parent) = fpath.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| map_io_error(e, parent))?;
    }

    let tmp = temp_sibling(fpath);
    if let Err(e) = write_file_async(&tmp, data).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(e);
    }
    if let Err(e) = fs::rename(&tmp, fpath).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(map_io_error(e, fpath));
    }
    Ok(())
}

pub async fn save_json<T>(fpath: PathBuf, data: T, log_ctx: String) -> AppResult<()>
where
    T: Serialize + Send + Sync + 'static,
{
    let serialized = task::spawn_blocking(move || to_json_bytes(&data))
        .await
        .map_err(AppError::from)
        .and_then(|res| res);
    let json_bytes = match serialized {
        Ok(bytes) => bytes,
        Err(e) => {
            log(
                LogLevel::Error,
                &format!(
                    "Save JSON ({}) FAIL - Serialize/Task Error: {}. File: '{}'",
                    log_ctx,
                    e,
                    fpath.display()
                ),
            );
            return Err(e);
        }
    };

    write_atomic(&fpath, &json_bytes).await.map_err(|e| {
        log(
            LogLevel::Error,
            &format!(
                "Save JSON ({}) FAIL - Write Error: {}. File: '{}'",
                log_ctx,
                e,
                fpath.display()
            ),
        );
        e
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pretty_output_uses_four_spaces() {
        let bytes = to_json_bytes(&json!([{"idx": 1}])).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, "[\n    {\n        \"idx\": 1\n    }\n]");
    }

    #[test]
    fn unserializable_data_is_a_serialize_error() {
        let bad = std::collections::BTreeMap::from([(vec![1u8], 1)]);
        let err = to_json_bytes(&bad).unwrap_err();
        assert!(matches!(err, AppError::SerdeSerialize(_)));
    }

    #[test]
    fn temp_file_is_a_hidden_sibling() {
        let tmp = temp_sibling(Path::new("out/pokemon.json"));
        assert_eq!(tmp, PathBuf::from("out/.pokemon.json.tmp"));
    }

    #[tokio::test]
    async fn save_json_creates_parent_and_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("pokemon.json");

        save_json(path.clone(), vec![1, 2], "first".into()).await.unwrap();
        save_json(path.clone(), vec![3], "second".into()).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "[\n    3\n]");
        assert!(!temp_sibling(&path).exists());
    }

    #[tokio::test]
    async fn save_json_into_a_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();

        let err = save_json(blocker.join("pokemon.json"), vec![1], "blocked".into())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }
}
