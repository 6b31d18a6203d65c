// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Background task processing.
//!
//! Work that may block the UI for a noticeable time, in practice the
//! library scan, is sent to a dedicated worker thread as an [`AppTask`].
//! The worker owns its own database connection and reports results back to
//! the application as [`AppEvent`]s.

use anyhow::{Result, bail};
use rusqlite::Connection;
use std::{
    sync::mpsc::{Receiver, Sender},
    thread,
};

use crate::{
    config::AppConfig,
    db::{self, scan},
    events::AppEvent,
};

#[derive(Debug)]
pub(crate) enum AppTask {
    ScanLibrary,
}

/// Spawns a background thread to process application tasks.
///
/// The worker opens its own connection to the configured database and then
/// blocks on `task_rx` until the sending side is dropped. A task that fails
/// is reported with [`AppEvent::Error`].
pub(crate) fn spawn_task_worker(
    config: &AppConfig,
    task_rx: Receiver<AppTask>,
    event_tx: Sender<AppEvent>,
) {
    let config = config.clone();

    thread::spawn(move || {
        let mut conn = match db::init_db(&config.database_file) {
            Ok(conn) => conn,
            Err(e) => {
                let _ = event_tx.send(AppEvent::Error(format!("{e:#}")));
                return;
            }
        };

        while let Ok(task) = task_rx.recv() {
            let mut ctx = TaskContext {
                config: &config,
                event_tx: &event_tx,
                conn: &mut conn,
            };

            if let Err(e) = handle_task(task, &mut ctx) {
                let _ = event_tx.send(AppEvent::Error(format!("{e:#}")));
            }
        }

        tracing::debug!("task worker finished");
    });
}

/// Resources shared by the task handlers.
struct TaskContext<'a> {
    config: &'a AppConfig,
    event_tx: &'a Sender<AppEvent>,
    conn: &'a mut Connection,
}

fn handle_task(task: AppTask, ctx: &mut TaskContext) -> Result<()> {
    match task {
        AppTask::ScanLibrary => scan_library(ctx),
    }
}

fn scan_library(ctx: &mut TaskContext) -> Result<()> {
    if ctx.config.media_dirs.is_empty() {
        bail!("No media directories configured");
    }

    let track_count = scan::process_music_library(ctx.conn, &ctx.config.media_dirs)?;
    ctx.event_tx.send(AppEvent::LibraryUpdated(track_count))?;

    Ok(())
}
