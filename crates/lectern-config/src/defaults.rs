// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Default configuration file template.

/// Documented configuration template carrying the demo provisioning plan.
///
/// Printed by `lectern-provision --print-default-config`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"#
# Lectern Configuration File
# Location: ~/.config/lectern/config.toml
#

# =============================================================================
# Media Service
# =============================================================================

[server]
# Root of the media service; requests go to {base_url}/api/v1/...
base_url = "https://media.example.com"

# Per-request timeout (in seconds)
timeout_secs = 30

[credential]
# Administrator account used for every call.
identifier = "admin"
# Prefer LECTERN_SECRET or LECTERN_SECRET_FILE over storing the secret here.
# secret = "..."

# =============================================================================
# Retries (lookups only; creates and grants are never retried)
# =============================================================================

[retry]
max_attempts = 3
base_delay_ms = 200
max_delay_ms = 5000

# =============================================================================
# Logging Configuration
# =============================================================================

[logging]
# Log level: error, warn, info, debug, trace
# RUST_LOG takes precedence when set.
level = "info"
# Output format: pretty, json
format = "pretty"

# =============================================================================
# Provisioning Plan
# =============================================================================

[plan]
folder_name = "MyFolderName"
group_name = "MyGroupName"
# Role granted to the group on the folder: viewer, creator, publisher
role = "creator"

[plan.user]
key = "UserKey"
first_name = "UserFirstName"
last_name = "UserLastName"
email = "user@mail.com"

# Reference to an externally managed group. Recorded in logs only.
[plan.external]
provider_id = "PanoptoExternalProviderId"
group_id = "externalFolderId"
"#;
