//! End-to-end tests driving the `sigil` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use sigil_core::{PRIVATE_KEY_PREFIX, PUBLIC_KEY_PREFIX};

fn sigil(args: &[&str]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sigil"));
    cmd.args(args);
    // Keep key resolution deterministic regardless of the host environment
    cmd.env_remove("NACL_PRIVATE_KEY");
    cmd.env_remove("NACL_PUBLIC_KEY");
    cmd
}

fn run(cmd: &mut Command) -> Output {
    cmd.output().expect("failed to run sigil")
}

fn generate(dir: &Path) -> (String, String) {
    let pub_path = dir.join("key.pub").to_str().unwrap().to_string();
    let priv_path = dir.join("key.sec").to_str().unwrap().to_string();
    let out = run(&mut sigil(&["generate", "-p", &pub_path, "-s", &priv_path]));
    assert!(out.status.success(), "generate failed: {out:?}");
    (pub_path, priv_path)
}

#[test]
fn generate_prints_both_keys_to_stdout() {
    let out = run(&mut sigil(&["generate"]));
    assert!(out.status.success());

    let stdout = String::from_utf8(out.stdout).unwrap();
    let mut lines = stdout.lines();
    assert!(lines.next().unwrap().starts_with(PUBLIC_KEY_PREFIX));
    assert!(lines.next().unwrap().starts_with(PRIVATE_KEY_PREFIX));
}

#[test]
fn sign_then_verify_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let (pub_path, priv_path) = generate(dir.path());

    let msg_path = dir.path().join("msg");
    fs::write(&msg_path, b"hello over files").unwrap();
    let signed_path = dir.path().join("msg.signed");

    let out = run(&mut sigil(&[
        "sign",
        "-s",
        &priv_path,
        "-m",
        msg_path.to_str().unwrap(),
        "-x",
        signed_path.to_str().unwrap(),
    ]));
    assert!(out.status.success(), "sign failed: {out:?}");

    // Payload goes to stdout when no output file is given
    let out = run(&mut sigil(&[
        "verify",
        "-p",
        &pub_path,
        "-x",
        signed_path.to_str().unwrap(),
    ]));
    assert!(out.status.success(), "verify failed: {out:?}");
    assert_eq!(out.stdout, b"hello over files");
}

#[test]
fn json_sign_then_verify_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let (pub_path, priv_path) = generate(dir.path());

    let doc_path = dir.path().join("doc.json");
    fs::write(&doc_path, br#"{"user":"alice","n":42}"#).unwrap();
    let signed_path = dir.path().join("doc.signed.json");

    let out = run(&mut sigil(&[
        "sign",
        "--json",
        "-s",
        &priv_path,
        "-m",
        doc_path.to_str().unwrap(),
        "-x",
        signed_path.to_str().unwrap(),
    ]));
    assert!(out.status.success(), "sign --json failed: {out:?}");

    let signed = fs::read(&signed_path).unwrap();
    assert!(signed.starts_with(br#"{"user":"alice","n":42,"naclSig":""#));

    let out = run(&mut sigil(&[
        "verify",
        "--json",
        "-p",
        &pub_path,
        "-x",
        signed_path.to_str().unwrap(),
    ]));
    assert!(out.status.success(), "verify --json failed: {out:?}");
    assert_eq!(out.stdout, br#"{"user":"alice","n":42}"#);
}

#[test]
fn verify_rejects_tampered_message() {
    let dir = tempfile::tempdir().unwrap();
    let (pub_path, priv_path) = generate(dir.path());

    let msg_path = dir.path().join("msg");
    fs::write(&msg_path, b"do not touch").unwrap();
    let signed_path = dir.path().join("msg.signed");

    let out = run(&mut sigil(&[
        "sign",
        "-s",
        &priv_path,
        "-m",
        msg_path.to_str().unwrap(),
        "-x",
        signed_path.to_str().unwrap(),
    ]));
    assert!(out.status.success());

    let mut signed = fs::read(&signed_path).unwrap();
    let last = signed.len() - 1;
    signed[last] ^= 0x01;
    fs::write(&signed_path, &signed).unwrap();

    let out = run(&mut sigil(&[
        "verify",
        "-p",
        &pub_path,
        "-x",
        signed_path.to_str().unwrap(),
    ]));
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("signature mismatch"), "stderr: {stderr}");
}

#[test]
fn sign_reads_key_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    let (pub_path, priv_path) = generate(dir.path());
    let priv_key = fs::read_to_string(&priv_path).unwrap();

    let msg_path = dir.path().join("msg");
    fs::write(&msg_path, b"from the environment").unwrap();
    let signed_path = dir.path().join("msg.signed");

    let out = run(sigil(&[
        "sign",
        "-m",
        msg_path.to_str().unwrap(),
        "-x",
        signed_path.to_str().unwrap(),
    ])
    .env("NACL_PRIVATE_KEY", priv_key.trim()));
    assert!(out.status.success(), "sign from env failed: {out:?}");

    let out = run(&mut sigil(&[
        "verify",
        "-p",
        &pub_path,
        "-x",
        signed_path.to_str().unwrap(),
    ]));
    assert!(out.status.success());
    assert_eq!(out.stdout, b"from the environment");
}

#[test]
fn custom_environment_variable_name() {
    let dir = tempfile::tempdir().unwrap();
    let (pub_path, priv_path) = generate(dir.path());
    let priv_key = fs::read_to_string(&priv_path).unwrap();

    let msg_path = dir.path().join("msg");
    fs::write(&msg_path, b"alt var").unwrap();

    let out = run(sigil(&[
        "sign",
        "--env",
        "SIGIL_ALT_KEY",
        "-m",
        msg_path.to_str().unwrap(),
        "-x",
        dir.path().join("msg.signed").to_str().unwrap(),
    ])
    .env("SIGIL_ALT_KEY", priv_key.trim()));
    assert!(out.status.success(), "sign with --env failed: {out:?}");

    let out = run(&mut sigil(&[
        "verify",
        "-p",
        &pub_path,
        "-x",
        dir.path().join("msg.signed").to_str().unwrap(),
    ]));
    assert!(out.status.success());
}

#[test]
fn bad_key_text_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let msg_path = dir.path().join("msg");
    fs::write(&msg_path, b"anything").unwrap();

    let out = run(&mut sigil(&[
        "sign",
        "--key",
        "not-a-key-at-all",
        "-m",
        msg_path.to_str().unwrap(),
    ]));
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("bad prefix"), "stderr: {stderr}");
}
