//! The gist backend against a mock GitHub API.

use crate::support::*;
use httpmock::prelude::*;
use httpmock::Method::PATCH;
use serde_json::json;

const TOKEN: &str = "gho_test";

/// Point the gist backend at `server` with a stored token.
fn gist_test(server: &MockServer) -> Test {
    let t = Test::new();
    t.write_config(&format!(
        "default_backend = \"githubgist\"\n\n[githubgist]\ntoken = \"{}\"\napi_url = \"{}\"\ntimeout_secs = 5\n",
        TOKEN,
        server.base_url()
    ));
    t
}

/// Accept the stored token.
fn mock_user(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(GET)
            .path("/user")
            .header("authorization", format!("token {}", TOKEN));
        then.status(200).json_body_obj(&json!({"login": "octocat"}));
    })
}

/// One page listing an unrelated gist and the envman gist holding `dev`.
fn mock_listing(server: &MockServer) -> httpmock::Mock<'_> {
    let listing = json!([
        {
            "id": "other",
            "url": server.url("/gists/other"),
            "public": true,
            "description": "dotfiles",
            "files": {
                "vimrc": {"filename": "vimrc", "raw_url": server.url("/raw/other/vimrc")}
            }
        },
        {
            "id": "g1",
            "url": server.url("/gists/g1"),
            "public": false,
            "description": "Envman Data",
            "updated_at": "2024-01-01T00:00:00Z",
            "files": {
                "envman": {"filename": "envman", "raw_url": server.url("/raw/g1/envman")},
                "dev": {"filename": "dev", "raw_url": server.url("/raw/g1/dev")}
            }
        }
    ]);

    server.mock(|when, then| {
        when.method(GET)
            .path("/gists")
            .query_param("per_page", "100")
            .query_param("page", "1")
            .header("authorization", format!("token {}", TOKEN));
        then.status(200).json_body_obj(&listing);
    })
}

fn mock_dev_content(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(GET).path("/raw/g1/dev");
        then.status(200).body(r#"{"A":"1","B":"two words"}"#);
    })
}

/// Gist detail returned by a PATCH, holding `files` as name to content.
fn detail(server: &MockServer, files: &[(&str, &str)]) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    for (name, content) in files {
        map.insert(
            name.to_string(),
            json!({
                "filename": name,
                "raw_url": server.url(format!("/raw/g1/{}", name)),
                "content": content,
            }),
        );
    }
    json!({
        "id": "g1",
        "url": server.url("/gists/g1"),
        "public": false,
        "description": "Envman Data",
        "files": map,
        "history": [{"version": "rev-2"}],
    })
}

#[test]
fn test_gist_list_hides_bootstrap_file() {
    let server = MockServer::start();
    let user = mock_user(&server);
    let listing = mock_listing(&server);
    let t = gist_test(&server);

    let output = t.list(None);

    assert_success(&output);
    assert_eq!(lines(&output), vec!["dev"]);
    user.assert();
    listing.assert();
}

#[test]
fn test_gist_list_variables() {
    let server = MockServer::start();
    mock_user(&server);
    mock_listing(&server);
    let content = mock_dev_content(&server);
    let t = gist_test(&server);

    let output = t.list(Some("dev"));

    assert_success(&output);
    assert_eq!(lines(&output), vec!["A", "B"]);
    content.assert();
}

#[cfg(unix)]
#[test]
fn test_gist_load() {
    let server = MockServer::start();
    mock_user(&server);
    mock_listing(&server);
    mock_dev_content(&server);
    let t = gist_test(&server);

    assert_success(&t.load("dev"));

    assert_eq!(t.read("loadenv_dev.sh"), "export A='1'\nexport B='two words'\n");
}

#[test]
fn test_gist_save_patches_only_its_file() {
    let server = MockServer::start();
    mock_user(&server);
    mock_listing(&server);
    mock_dev_content(&server);
    let patch = server.mock(|when, then| {
        when.method(PATCH)
            .path("/gists/g1")
            .json_body_obj(&json!({
                "files": {"dev": {"content": r#"{"A":"1","B":"two words","C":"3"}"#}}
            }));
        then.status(200).json_body_obj(&detail(
            &server,
            &[("envman", "{}"), ("dev", r#"{"A":"1","B":"two words","C":"3"}"#)],
        ));
    });
    let t = gist_test(&server);

    let output = t
        .cmd()
        .env("C", "3")
        .args(["save", "dev", "C"])
        .output()
        .unwrap();

    assert_success(&output);
    patch.assert();
}

#[test]
fn test_gist_remove_environment_sends_null() {
    let server = MockServer::start();
    mock_user(&server);
    mock_listing(&server);
    let patch = server.mock(|when, then| {
        when.method(PATCH)
            .path("/gists/g1")
            .json_body_obj(&json!({"files": {"dev": null}}));
        then.status(200)
            .json_body_obj(&detail(&server, &[("envman", "{}")]));
    });
    let t = gist_test(&server);

    assert_success(&t.remove("dev", &[]));
    patch.assert();
}

#[test]
fn test_gist_reserved_name_rejected() {
    let server = MockServer::start();
    mock_user(&server);
    mock_listing(&server);
    let patch = server.mock(|when, then| {
        when.method(PATCH).path("/gists/g1");
        then.status(200);
    });
    let t = gist_test(&server);

    let output = t.save("EnvMan", &[("ENVMAN_T_A", "1")]);

    assert_failure(&output);
    assert_stderr_contains(&output, "reserved name");
    assert_eq!(patch.hits(), 0);
}

#[test]
fn test_gist_missing_environment() {
    let server = MockServer::start();
    mock_user(&server);
    mock_listing(&server);
    let t = gist_test(&server);

    let output = t.load("prod");

    assert_failure(&output);
    assert_stderr_contains(&output, "environment \"prod\" doesn't exist");
}

#[test]
fn test_gist_server_error_is_reported() {
    let server = MockServer::start();
    mock_user(&server);
    server.mock(|when, then| {
        when.method(GET).path("/gists");
        then.status(502);
    });
    let t = gist_test(&server);

    let output = t.list(None);

    assert_failure(&output);
    assert_stderr_contains(&output, "invalid status code: 502");
    // The token is kept in the saved config.
    assert_eq!(t.config()["githubgist"]["token"].as_str(), Some(TOKEN));
}

#[test]
fn test_gist_load_refuses_injected_name() {
    let server = MockServer::start();
    mock_user(&server);
    mock_listing(&server);
    server.mock(|when, then| {
        when.method(GET).path("/raw/g1/dev");
        then.status(200)
            .body(r#"{"A":"1","X=1; touch /tmp/pwned; Y":"v"}"#);
    });
    let t = gist_test(&server);

    let output = t.load("dev");

    assert_failure(&output);
    assert_stderr_contains(&output, "invalid variable name");
    assert!(!t.dir.path().join("loadenv_dev.sh").exists());
    assert!(!t.dir.path().join("loadenv_dev.bat").exists());
    assert!(!t.dir.path().join("loadenv_dev.ps1").exists());
}

#[test]
fn test_gist_save_invalid_name_sends_nothing() {
    let server = MockServer::start();
    mock_user(&server);
    mock_listing(&server);
    let patch = server.mock(|when, then| {
        when.method(PATCH).path("/gists/g1");
        then.status(200);
    });
    let t = gist_test(&server);

    let output = t.cmd().args(["save", "dev", "BAD-NAME"]).output().unwrap();

    assert_failure(&output);
    assert_stderr_contains(&output, "invalid variable name");
    assert_eq!(patch.hits(), 0);
}

#[test]
fn test_gist_cleanup_forgets_revoked_token() {
    let server = MockServer::start();
    mock_user(&server);
    mock_listing(&server);
    let delete_gist = server.mock(|when, then| {
        when.method(DELETE).path("/gists/g1");
        then.status(204);
    });
    let note = envman::core::remote::token_note().unwrap();
    server.mock(|when, then| {
        when.method(GET)
            .path("/authorizations")
            .header("authorization", format!("token {}", TOKEN));
        then.status(200).json_body_obj(&json!([
            {"url": server.url("/authorizations/1"), "scopes": ["gist"], "note": note}
        ]));
    });
    let revoke = server.mock(|when, then| {
        when.method(DELETE).path("/authorizations/1");
        then.status(204);
    });
    let t = gist_test(&server);

    let output = t.cleanup();

    assert_success(&output);
    delete_gist.assert();
    revoke.assert();
    let config = t.config();
    assert!(config["githubgist"].get("token").is_none());
    assert_eq!(config["default_backend"].as_str(), Some("githubgist"));
}
