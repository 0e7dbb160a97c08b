//! End-to-end tests of the client facade against the in-memory transport.

use std::fs;

use ftpc::{ChannelError, ExclusionSet, FtpClient, ServerIdentity};
use test_support::MemoryTransport;

fn client_over(transport: &MemoryTransport) -> FtpClient<MemoryTransport> {
    FtpClient::new(
        ServerIdentity::new("ftp.example.net", "archive", "hunter2"),
        transport.clone(),
        transport.probe(),
    )
}

fn fixture() -> MemoryTransport {
    // a (dir) -> x (file), b (dir) -> y (file)
    let transport = MemoryTransport::new();
    transport.add_file("a/x", b"x-bytes".to_vec());
    transport.add_file("a/b/y", b"y-bytes".to_vec());
    transport
}

#[test]
fn full_walk_yields_children_in_depth_first_order() {
    let transport = fixture();
    let mut client = client_over(&transport);
    client.set_path("a");

    let entries: Vec<(String, bool)> = client
        .list_tree()
        .iter()
        .map(|entry| (entry.path().to_string(), entry.is_directory()))
        .collect();

    // MemoryTransport lists names in lexicographic order, so "b" precedes
    // "x" and the sibling subtree of "b" is fully expanded first.
    assert_eq!(
        entries,
        vec![
            ("a/b".to_string(), true),
            ("a/b/y".to_string(), false),
            ("a/x".to_string(), false),
        ]
    );
    assert_eq!(client.entries().len(), 3);
}

#[test]
fn walk_never_yields_the_root_itself() {
    let transport = fixture();
    let mut client = client_over(&transport);
    client.set_path("a");

    assert!(
        client
            .list_tree()
            .iter()
            .all(|entry| entry.path() != "a")
    );
}

#[test]
fn exclusions_prune_names_and_whole_subtrees() {
    let transport = fixture();
    let mut client = client_over(&transport);
    client.set_path("a");
    client.set_exclusions(["b"].into_iter().collect::<ExclusionSet>());

    let paths: Vec<&str> = client
        .list_tree()
        .iter()
        .map(ftpc::RemoteEntry::path)
        .collect();
    assert_eq!(paths, vec!["a/x"]);
}

#[test]
fn list_level_classifies_one_level_only() {
    let transport = fixture();
    let mut client = client_over(&transport);
    client.set_path("a");

    let entries: Vec<(String, bool)> = client
        .list_level()
        .iter()
        .map(|entry| (entry.path().to_string(), entry.is_directory()))
        .collect();
    assert_eq!(
        entries,
        vec![("a/b".to_string(), true), ("a/x".to_string(), false)]
    );
}

#[test]
fn listing_an_unreachable_path_yields_no_entries() {
    let transport = MemoryTransport::new();
    transport.add_dir("vault");
    transport.fail_path("vault");
    let mut client = client_over(&transport);
    client.set_path("vault");

    assert!(client.list_tree().is_empty());
    assert!(client.list_level().is_empty());
}

#[test]
fn upload_then_download_round_trips_bytes() {
    let transport = MemoryTransport::new();
    let client = client_over(&transport);

    let temp = tempfile::tempdir().expect("tempdir");
    let original = temp.path().join("original.bin");
    let restored = temp.path().join("restored.bin");
    let payload: Vec<u8> = (0..ftpc::READ_LENGTH * 2 + 17)
        .map(|i| (i % 255) as u8)
        .collect();
    fs::write(&original, &payload).expect("write original");

    client.upload(&original, "archive.bin").expect("upload");
    client
        .download("archive.bin", &restored)
        .expect("download");
    assert_eq!(fs::read(&restored).expect("read restored"), payload);
}

#[test]
fn delete_removes_the_scoped_remote_file() {
    let transport = fixture();
    let mut client = client_over(&transport);
    client.set_path("a");

    client.delete("x").expect("delete");
    assert!(transport.file("a/x").is_none());
    assert!(transport.file("a/b/y").is_some());
}

#[test]
fn empty_credentials_fail_before_the_transport_sees_anything() {
    let transport = fixture();
    let mut client = FtpClient::new(
        ServerIdentity::new("ftp.example.net", "archive", "  "),
        transport.clone(),
        transport.probe(),
    );
    client.set_path("a");

    assert!(client.list_tree().is_empty());
    let error = client.delete("x").expect_err("config error");
    assert!(matches!(error, ChannelError::Config { .. }));
    assert_eq!(transport.calls().total(), 0);
}

#[test]
fn config_file_builds_a_working_client() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("client.json");
    fs::write(
        &path,
        r#"{"host":"ten.elpmaxe.ptf","user":"evihcra","password":"2retnuh"}"#,
    )
    .expect("write config");

    let identity = ftpc::ClientConfig::from_path(&path)
        .expect("load config")
        .into_identity(|field| {
            Ok::<_, std::convert::Infallible>(field.chars().rev().collect())
        })
        .expect("decrypt");

    let transport = fixture();
    let mut client = FtpClient::new(identity, transport.clone(), transport.probe());
    client.set_path("a");
    assert_eq!(client.list_tree().len(), 3);
}

#[test]
fn chunked_reads_are_available_through_the_channel() {
    let transport = MemoryTransport::new();
    let payload: Vec<u8> = (0..ftpc::READ_LENGTH + 3).map(|i| (i % 256) as u8).collect();
    transport.add_file("blob", payload.clone());
    let client = client_over(&transport);

    let chunks = client.channel().read_chunks("blob").expect("read chunks");
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks.concat(), payload);
}
