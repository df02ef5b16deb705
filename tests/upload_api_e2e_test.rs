// ==========================================
// 步数报告服务 - HTTP 端到端测试
// ==========================================
// 范围: GET / , POST /upload , GET /:format/:name
// 方式: 随机端口启动服务,发送原始 HTTP 请求
// ==========================================


use test_helpers::{get, send_raw, spawn_server, upload, Part};

const VALID_CSV: &[u8] = b"pp;kk;vvvv;askeleet\r\n01;01;2022;1000\r\n02;01;2022;2400\r\n";

// ==========================================
// GET /
// ==========================================

#[tokio::test]
async fn test_index_renders_upload_form() {
    let server = spawn_server().await;
    let (status, head, body) = get(server.addr, "/").await;

    assert_eq!(status, 200);
    assert!(head.to_ascii_lowercase().contains("content-type: text/html"));
    assert!(body.contains("action=\"/upload\""));
    assert!(body.contains("name=\"tiedosto\""));
    assert!(!body.contains("class=\"notice\""));
}

#[tokio::test]
async fn test_index_renders_notice_for_known_code() {
    let server = spawn_server().await;
    let (status, _, body) = get(server.addr, "/?virhe=missing_file").await;

    assert_eq!(status, 200);
    assert!(body.contains("Virhe: tiedosto puuttuu"));
}

#[tokio::test]
async fn test_index_ignores_unknown_code() {
    let server = spawn_server().await;
    let (status, _, body) = get(server.addr, "/?virhe=%3Cscript%3E").await;

    assert_eq!(status, 200);
    assert!(!body.contains("class=\"notice\""));
    assert!(!body.contains("<script>"));
}

// ==========================================
// POST /upload - CSV
// ==========================================

#[tokio::test]
async fn test_upload_valid_csv_renders_report_and_archives() {
    let server = spawn_server().await;
    let (status, _, body) = upload(
        server.addr,
        &[Part::file("tammikuu_2022.csv", VALID_CSV)],
    )
    .await;

    assert_eq!(status, 200, "body: {body}");
    assert!(body.contains("<h1>Tammikuu 2022</h1>"));
    assert!(body.contains("<td>01</td><td>1</td><td>2022</td><td>1000</td>"));
    assert!(body.contains("<td>02</td><td>1</td><td>2022</td><td>2400</td>"));
    assert!(body.contains("<td>3400</td>"));

    // 暂存 + 归档各一份
    assert_eq!(server.staging_files(), 1);
    let archived = server.archived_files("csv");
    assert_eq!(archived.len(), 1);
    assert!(archived[0].ends_with(".csv"));
    assert!(server.archived_files("json").is_empty());

    let stored = std::fs::read(server.config.archive_dir.join("csv").join(&archived[0])).unwrap();
    assert_eq!(stored, VALID_CSV);
}

#[tokio::test]
async fn test_upload_csv_with_wrong_field_count() {
    let server = spawn_server().await;
    let (status, _, body) = upload(
        server.addr,
        &[Part::file("tammikuu_2022.csv", b"h\n01;01;2022\n")],
    )
    .await;

    assert_eq!(status, 422);
    assert!(body.contains("neljä puolipisteellä erotettua kenttää"));
}

#[tokio::test]
async fn test_upload_csv_with_non_numeric_field() {
    let server = spawn_server().await;
    let (status, _, body) = upload(
        server.addr,
        &[Part::file("tammikuu_2022.csv", b"h\n01;abc;2022;1000\n")],
    )
    .await;

    assert_eq!(status, 422);
    assert!(body.contains("Kaikkien kenttien tulee olla numeroita."));
    // 内部细节不回显
    assert!(!body.contains("abc"));
}

#[tokio::test]
async fn test_rejected_csv_is_still_archived() {
    // 归档发生在解析之前,校验失败的文件同样保留
    let server = spawn_server().await;
    let (status, _, _) = upload(
        server.addr,
        &[Part::file("huono.csv", b"h\n01;01;2022\n")],
    )
    .await;

    assert_eq!(status, 422);
    assert_eq!(server.archived_files("csv").len(), 1);
}

// ==========================================
// POST /upload - JSON
// ==========================================

#[tokio::test]
async fn test_upload_valid_json_renders_native_structure() {
    let server = spawn_server().await;
    let json = br#"[{"pp":"05","kk":3,"vvvv":2022,"askeleet":8000,"kommentti":"lenkki"}]"#;
    let (status, _, body) = upload(server.addr, &[Part::file("maaliskuu_2022.json", json)]).await;

    assert_eq!(status, 200, "body: {body}");
    assert!(body.contains("<h1>Maaliskuu 2022</h1>"));
    assert!(body.contains("Tiedostomuoto: json"));
    assert!(body.contains("<th>kommentti</th>"));
    assert!(body.contains("<td>lenkki</td>"));
    assert_eq!(server.archived_files("json").len(), 1);
}

#[tokio::test]
async fn test_upload_invalid_json_renders_error_page() {
    let server = spawn_server().await;
    let (status, _, body) = upload(
        server.addr,
        &[Part::file("maaliskuu_2022.json", b"{\"pp\": ")],
    )
    .await;

    assert_eq!(status, 422);
    assert!(body.contains("JSON-tiedostoa ei voitu lukea."));
}

// ==========================================
// POST /upload - 上传层错误
// ==========================================

#[tokio::test]
async fn test_upload_txt_is_rejected_before_parsing() {
    let server = spawn_server().await;
    let (status, _, body) = upload(
        server.addr,
        &[Part::file("muistiinpanot.txt", b"01;01;2022;1000")],
    )
    .await;

    assert_eq!(status, 400);
    assert!(body.contains("Virheellinen tiedostomuoto. Käytä ainoastaan JSON- tai CSV-tiedostoja."));
    assert_eq!(server.staging_files(), 0);
    assert!(server.archived_files("csv").is_empty());
    assert!(server.archived_files("json").is_empty());
}

#[tokio::test]
async fn test_upload_without_selected_file_rerenders_form() {
    let server = spawn_server().await;
    let (status, _, body) = upload(server.addr, &[Part::file("", b"")]).await;

    assert_eq!(status, 200);
    assert!(body.contains("Virhe: tiedosto puuttuu"));
    assert!(body.contains("action=\"/upload\""));
    assert_eq!(server.staging_files(), 0);
}

#[tokio::test]
async fn test_upload_with_only_text_fields_is_missing_file() {
    let server = spawn_server().await;
    let (status, _, body) = upload(server.addr, &[Part::text("kuvaus", "tammikuu")]).await;

    assert_eq!(status, 200);
    assert!(body.contains("Virhe: tiedosto puuttuu"));
}

#[tokio::test]
async fn test_upload_with_unexpected_field_name() {
    let server = spawn_server().await;
    let mut part = Part::file("tammikuu_2022.csv", VALID_CSV);
    part.name = "file";
    let (status, _, body) = upload(server.addr, &[part]).await;

    assert_eq!(status, 400);
    assert!(body.contains("Jotain meni vikaan"));
    assert_eq!(server.staging_files(), 0);
}

#[tokio::test]
async fn test_upload_with_two_files_is_rejected() {
    let server = spawn_server().await;
    let (status, _, body) = upload(
        server.addr,
        &[
            Part::file("a.csv", VALID_CSV),
            Part::file("b.csv", VALID_CSV),
        ],
    )
    .await;

    assert_eq!(status, 400);
    assert!(body.contains("Jotain meni vikaan"));
    assert_eq!(server.staging_files(), 0);
}

#[tokio::test]
async fn test_upload_without_multipart_body() {
    let server = spawn_server().await;
    let (status, _, body) = send_raw(
        "POST",
        server.addr,
        "/upload",
        &[("Content-Type", "application/json")],
        b"{}",
    )
    .await;

    assert_eq!(status, 400);
    assert!(body.contains("Jotain meni vikaan"));
}

// ==========================================
// GET /:format/:name
// ==========================================

#[tokio::test]
async fn test_archived_original_can_be_downloaded() {
    let server = spawn_server().await;
    let (status, _, _) = upload(
        server.addr,
        &[Part::file("tammikuu_2022.csv", VALID_CSV)],
    )
    .await;
    assert_eq!(status, 200);

    let name = server.archived_files("csv").remove(0);
    let (status, head, body) = get(server.addr, &format!("/csv/{name}")).await;

    assert_eq!(status, 200);
    assert!(head.to_ascii_lowercase().contains("content-type: text/csv"));
    assert_eq!(body.as_bytes(), VALID_CSV);
}

#[tokio::test]
async fn test_archive_rejects_unknown_names() {
    let server = spawn_server().await;

    let (status, _, body) = get(server.addr, "/csv/not-a-uuid.csv").await;
    assert_eq!(status, 404);
    assert!(body.contains("Tiedostoa ei löytynyt."));

    let (status, _, _) =
        get(server.addr, "/txt/00000000-0000-0000-0000-000000000000.txt").await;
    assert_eq!(status, 404);

    let (status, _, _) =
        get(server.addr, "/csv/00000000-0000-0000-0000-000000000000.csv").await;
    assert_eq!(status, 404);

    // 格式与后缀不一致
    let (status, _, _) =
        get(server.addr, "/csv/00000000-0000-0000-0000-000000000000.json").await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn test_unknown_route_renders_error_page() {
    let server = spawn_server().await;
    let (status, _, body) = get(server.addr, "/a/b/c").await;

    assert_eq!(status, 404);
    assert!(body.contains("<h1>Virhe</h1>"));
}

#[tokio::test]
async fn test_get_upload_redirects_to_form() {
    let server = spawn_server().await;
    let (status, head, _) = get(server.addr, "/upload").await;

    assert_eq!(status, 303);
    assert!(head.lines().any(|l| l.eq_ignore_ascii_case("location: /")));
}
