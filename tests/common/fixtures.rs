//! Test fixture helpers for creating screenshot projects
//!
//! Provides a temporary project root laid out the way the pipeline expects
//! (`baselines/`, `artifacts/current/`, `reports/`) plus PNG writers.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use shotdiff::config::ProjectLayout;
use shotdiff::infra::RealFileSystem;
use shotdiff::raster::RasterImage;

pub const WHITE: [u8; 4] = [255, 255, 255, 255];
pub const BLACK: [u8; 4] = [0, 0, 0, 255];

/// A temporary project root; dropped with the test
pub struct ProjectFixture {
    dir: TempDir,
    pub layout: ProjectLayout,
}

impl ProjectFixture {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let layout = ProjectLayout::new(dir.path());
        Self { dir, layout }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write a solid-colour baseline screenshot
    pub fn baseline(&self, name: &str, width: u32, height: u32, rgba: [u8; 4]) -> PathBuf {
        write_png(&self.layout.baselines.join(name), width, height, rgba)
    }

    /// Write a solid-colour current screenshot
    pub fn current(&self, name: &str, width: u32, height: u32, rgba: [u8; 4]) -> PathBuf {
        write_png(&self.layout.current.join(name), width, height, rgba)
    }

    /// Write an identical baseline/current pair
    pub fn unchanged_pair(&self, name: &str) {
        self.baseline(name, 8, 8, WHITE);
        self.current(name, 8, 8, WHITE);
    }

    /// Write a pair that differs in every pixel
    pub fn changed_pair(&self, name: &str) {
        self.baseline(name, 8, 8, WHITE);
        self.current(name, 8, 8, BLACK);
    }

    /// Write raw bytes at a project-relative path
    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, contents).expect("Failed to write file");
        path
    }

    /// Names of the timestamped reports currently on disk
    pub fn timestamped_reports(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.layout.reports) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|n| n.starts_with("report-") && n.ends_with(".html"))
            .collect();
        names.sort();
        names
    }
}

/// Write a solid-colour PNG, creating parent directories
pub fn write_png(path: &Path, width: u32, height: u32, rgba: [u8; 4]) -> PathBuf {
    fs::create_dir_all(path.parent().expect("path has a parent")).expect("Failed to create dir");
    RasterImage::filled(width, height, rgba)
        .save(&RealFileSystem, path)
        .expect("Failed to write PNG");
    path.to_path_buf()
}
