/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes three top-level command modules:

- `status`   — Authenticate and report the session state
- `licenses` — Fetch and print the license document
- `secrets`  — Verify Secret Server access

These handlers are intentionally small and use the library components:
the auth client, the license service, and the secret client.
*/

pub mod licenses;
pub mod secrets;
pub mod status;
