//! IO helper: JSON 读取、文本读写与目录遍历

use std::{
    fs::{self, File},
    io::BufReader,
    path::{Path, PathBuf},
};

use serde_json::Value;

use crate::model::error::{AppError, LoadError};

/// 从文件读取JSON数据
pub fn read_json_file(p: &Path) -> Result<Value, LoadError> {
    let f = File::open(p)?;
    let rdr = BufReader::new(f);
    let v: Value = serde_json::from_reader(rdr)?;
    Ok(v)
}

/// 以 UTF-8 文本读取整个文件
pub fn read_text_file(p: &Path) -> Result<String, AppError> {
    fs::read_to_string(p).map_err(|e| AppError::io(p, e))
}

/// 原地覆盖写入
pub fn write_text_file(p: &Path, text: &str) -> Result<(), AppError> {
    fs::write(p, text).map_err(|e| AppError::io(p, e))
}

pub fn is_json_file(p: &Path) -> bool {
    p.extension().is_some_and(|ext| ext == "json")
}

/// 递归收集目录下所有 `*.json` 文件，按路径排序
pub fn collect_json_files(root: &Path) -> Result<Vec<PathBuf>, AppError> {
    fn walk(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), AppError> {
        let entries = fs::read_dir(dir).map_err(|e| AppError::io(dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| AppError::io(dir, e))?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(|e| AppError::io(&path, e))?;
            if file_type.is_dir() {
                walk(&path, out)?;
            } else if file_type.is_file() && is_json_file(&path) {
                out.push(path);
            }
        }
        Ok(())
    }

    let mut out = Vec::new();
    walk(root, &mut out)?;
    out.sort();
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_json_files_recursive() {
        let dir = tempfile::tempdir().expect("创建临时目录失败");
        let nested = dir.path().join("bestiary-1").join("goblins");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("a.json"), "{}").unwrap();
        fs::write(nested.join("warrior.json"), "{}").unwrap();
        fs::write(nested.join("notes.txt"), "x").unwrap();
        fs::write(nested.join("backup.json.bak"), "{}").unwrap();

        let files = collect_json_files(dir.path()).expect("遍历应该成功");
        assert_eq!(files.len(), 2);
        assert_eq!(files[0], dir.path().join("a.json"));
        assert_eq!(files[1], nested.join("warrior.json"));
    }

    #[test]
    fn test_collect_missing_root_fails() {
        let dir = tempfile::tempdir().expect("创建临时目录失败");
        let result = collect_json_files(&dir.path().join("missing"));
        assert!(matches!(result, Err(AppError::Io { .. })));
    }

    #[test]
    fn test_text_round_trip() {
        let dir = tempfile::tempdir().expect("创建临时目录失败");
        let path = dir.path().join("goblin.json");
        write_text_file(&path, "{\"name\": \"Goblin\"}").unwrap();
        assert_eq!(read_text_file(&path).unwrap(), "{\"name\": \"Goblin\"}");
    }
}
