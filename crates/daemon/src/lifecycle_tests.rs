// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn paths_hang_off_the_state_dir() {
    let config = Config::at("/tmp/nudge-test");
    assert_eq!(config.state_dir, PathBuf::from("/tmp/nudge-test"));
    assert_eq!(config.tasks_path, PathBuf::from("/tmp/nudge-test/tasks.json"));
    assert_eq!(config.snooze_path, PathBuf::from("/tmp/nudge-test/snoozes.json"));
    assert_eq!(config.socket_path, PathBuf::from("/tmp/nudge-test/nudged.sock"));
    assert_eq!(config.log_path, PathBuf::from("/tmp/nudge-test/nudged.log"));
}
