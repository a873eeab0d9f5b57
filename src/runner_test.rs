/// Tests for runner module
///
/// These drive the whole pipeline against canned responses, so no
/// network access is needed.
#[cfg(test)]
mod tests {
    use crate::api::{Endpoints, HttpTransport, Transport};
    use crate::config::LookupConfig;
    use crate::error::{Error, Result};
    use crate::report::{CsvLayout, ExportFormat};
    use crate::runner::run;
    use crate::status::Clock;
    use crate::warranty::Locale;
    use calamine::{Data, Reader, Xlsx, open_workbook};
    use chrono::NaiveDate;
    use serde_json::{Value, json};
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::fs::File;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::path::Path;
    use std::thread;

    /// Transport answering from a URL -> body table and recording each call
    struct StubTransport {
        responses: HashMap<String, String>,
        calls: RefCell<Vec<String>>,
    }

    impl StubTransport {
        fn new(endpoints: &Endpoints, products: &str, warranty: Value) -> Self {
            let mut responses = HashMap::new();
            responses.insert(endpoints.products.clone(), products.to_string());
            responses.insert(endpoints.warranty.clone(), warranty.to_string());
            StubTransport { responses, calls: RefCell::new(Vec::new()) }
        }

        fn with(mut self, url: &str, body: Value) -> Self {
            self.responses.insert(url.to_string(), body.to_string());
            self
        }

        fn respond(&self, url: &str) -> Result<String> {
            self.calls.borrow_mut().push(url.to_string());
            self.responses
                .get(url)
                .cloned()
                .ok_or_else(|| Error::Http { url: url.to_string(), message: "HTTP 404 Not Found".to_string() })
        }
    }

    impl Transport for StubTransport {
        fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String> {
            assert_eq!(query.first().map(|(k, _)| *k), Some("productId"));
            self.respond(url)
        }

        fn post_json(&self, url: &str, _body: &Value) -> Result<String> {
            self.respond(url)
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn config(dir: &Path, serial: &str, format: ExportFormat) -> LookupConfig {
        LookupConfig {
            serial: serial.to_string(),
            format,
            output_dir: dir.to_path_buf(),
            endpoints: Endpoints::new("http://stub.invalid/api"),
            locale: Locale::default(),
            clock: Clock::Local,
            csv_layout: CsvLayout::Legacy,
        }
    }

    fn warranty_response(base: Value) -> Value {
        json!({
            "data": {
                "machineInfo": {
                    "serial": "PF2ABCDE",
                    "model": "20XKS0AB00",
                    "productName": "ThinkPad T14",
                    "buildDate": "2020-06-01",
                    "shipToCountry": "US",
                    "status": "Shipped",
                    "brand": "ThinkPad",
                    "series": "T Series",
                    "productImage": null
                },
                "warrantyStatus": "Out Of Warranty",
                "oow": true,
                "baseWarranties": base,
                "upgradeWarranties": []
            }
        })
    }

    fn read_csv(path: &Path) -> Vec<Vec<String>> {
        let mut reader = csv::ReaderBuilder::new().has_headers(false).flexible(true).from_path(path).unwrap();
        reader.records().map(|r| r.unwrap().iter().map(|f| f.to_string()).collect()).collect()
    }

    fn read_sheet(path: &Path) -> (Vec<String>, Vec<Vec<Data>>) {
        let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
        let names = workbook.sheet_names();
        let range = workbook.worksheet_range(&names[0]).unwrap();
        let rows = range.rows().map(|r| r.to_vec()).collect();
        (names, rows)
    }

    fn read_styles(path: &Path) -> String {
        let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
        let mut styles = String::new();
        archive.by_name("xl/styles.xml").unwrap().read_to_string(&mut styles).unwrap();
        styles
    }

    fn text(s: &str) -> Data {
        Data::String(s.to_string())
    }

    /// Serve `routes` over HTTP on a local port, one connection per route.
    /// Each route is (path suffix, status line, body).
    fn serve(routes: Vec<(&'static str, &'static str, String)>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}/api", listener.local_addr().unwrap());
        thread::spawn(move || {
            for stream in listener.incoming().take(routes.len()) {
                let mut stream = stream.unwrap();
                let mut reader = BufReader::new(stream.try_clone().unwrap());

                let mut request_line = String::new();
                reader.read_line(&mut request_line).unwrap();
                let mut content_length = 0;
                loop {
                    let mut line = String::new();
                    reader.read_line(&mut line).unwrap();
                    if line.trim_end().is_empty() {
                        break;
                    }
                    if let Some((name, value)) = line.split_once(':') {
                        if name.eq_ignore_ascii_case("content-length") {
                            content_length = value.trim().parse().unwrap();
                        }
                    }
                }
                let mut request_body = vec![0; content_length];
                reader.read_exact(&mut request_body).unwrap();

                let path = request_line.split_whitespace().nth(1).unwrap_or("");
                let (status, body) = routes
                    .iter()
                    .find(|(suffix, _, _)| path.split('?').next().unwrap_or("").ends_with(suffix))
                    .map(|(_, status, body)| (*status, body.as_str()))
                    .unwrap_or(("404 Not Found", ""));
                write!(
                    stream,
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                )
                .unwrap();
            }
        });
        base
    }

    #[test]
    fn test_csv_run_with_expired_base_warranty() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), "PF2ABCDE", ExportFormat::Csv);
        let base = json!([{"name": "Depot", "type": "BASE", "startDate": "2020-06-01", "endDate": "2023-05-31"}]);
        let transport =
            StubTransport::new(&config.endpoints, r#"{"Name": "ThinkPad T14 Type 20XK - Intel"}"#, warranty_response(base));

        let path = run(&config, &transport, today()).expect("run should succeed");
        assert_eq!(path, dir.path().join("Warranty_info_PF2ABCDE.csv"));

        let rows = read_csv(&path);
        assert_eq!(rows.len(), 3, "header, machine-info row, one warranty row");
        assert_eq!(rows[0][0], "Serial Number");
        assert_eq!(rows[1].len(), 11);
        assert_eq!(rows[1][8], "N/A");
        assert_eq!(rows[1][9], "Out Of Warranty");
        assert_eq!(rows[1][10], "Yes");
        assert_eq!(rows[2].len(), 9);
        assert_eq!(rows[2][0], "Depot");
        assert_eq!(rows[2][7], "N/A");
        assert_eq!(rows[2][8], "Expired");

        // CSV runs never touch the parts endpoints
        assert_eq!(transport.calls.borrow().len(), 2);
    }

    #[test]
    fn test_csv_sectioned_layout_adds_warranty_header() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config(dir.path(), "PF2ABCDE", ExportFormat::Csv);
        config.csv_layout = CsvLayout::Sectioned;
        let base = json!([{"name": "Depot", "endDate": "2099-01-01"}]);
        let transport = StubTransport::new(&config.endpoints, r#"[{"Name": "T14 Type 20XK"}]"#, warranty_response(base));

        let rows = read_csv(&run(&config, &transport, today()).unwrap());
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[2][0], "Warranty Name");
        assert_eq!(rows[3][8], "Active");
    }

    #[test]
    fn test_warranty_lookup_uses_last_type_number() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), "S1", ExportFormat::Csv);
        let transport = StubTransport::new(
            &config.endpoints,
            r#"{"Name": "ThinkPad Type 20AB Type 21CD - Model X"}"#,
            warranty_response(json!([])),
        );

        struct Capture<'a>(&'a StubTransport, RefCell<Option<Value>>);
        impl Transport for Capture<'_> {
            fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String> {
                self.0.get(url, query)
            }
            fn post_json(&self, url: &str, body: &Value) -> Result<String> {
                *self.1.borrow_mut() = Some(body.clone());
                self.0.post_json(url, body)
            }
        }

        let capture = Capture(&transport, RefCell::new(None));
        run(&config, &capture, today()).unwrap();
        let body = capture.1.borrow().clone().unwrap();
        assert_eq!(body["machineType"], "21CD");
        assert_eq!(body["serialNumber"], "S1");
    }

    #[test]
    fn test_unresolved_type_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), "PF2ABCDE", ExportFormat::Csv);
        let transport = StubTransport::new(&config.endpoints, r#"{"Name": "Unknown product"}"#, json!({}));

        let err = run(&config, &transport, today()).unwrap_err();
        assert!(matches!(err, Error::UnresolvedType { .. }));
        assert_eq!(transport.calls.borrow().len(), 1, "no warranty lookup after failed resolution");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_non_json_product_lookup_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), "PF2ABCDE", ExportFormat::Csv);
        let transport = StubTransport::new(&config.endpoints, "<html>Access denied</html>", json!({}));

        let err = run(&config, &transport, today()).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_empty_product_list_is_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), "PF2ABCDE", ExportFormat::Csv);
        let transport = StubTransport::new(&config.endpoints, "[]", json!({}));

        assert!(matches!(run(&config, &transport, today()).unwrap_err(), Error::Format(_)));
    }

    #[test]
    fn test_malformed_warranty_response_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), "PF2ABCDE", ExportFormat::Csv);
        let transport =
            StubTransport::new(&config.endpoints, r#"{"Name": "T14 Type 20XK"}"#, json!({"code": 1, "msg": "error"}));

        assert!(matches!(run(&config, &transport, today()).unwrap_err(), Error::Shape(_)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_xlsx_run_fetches_parts_and_writes_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), "AB/12:34", ExportFormat::Xlsx);
        let base = json!([{"name": "Depot", "endDate": "2023-05-31"}]);
        let transport =
            StubTransport::new(&config.endpoints, r#"{"Name": "ThinkPad T14 Type 20XK - Intel"}"#, warranty_response(base))
                .with(
                    &config.endpoints.parts_model,
                    json!({"data": [{"id": "X", "name": "Keyboard", "commodityVal": "KEYBOARD", "substitutes": ["Y"]}]}),
                )
                .with(&config.endpoints.parts_as_built, json!({"data": [{"id": "X", "name": "Keyboard (as built)"}]}));

        let path = run(&config, &transport, today()).expect("run should succeed");
        assert_eq!(path, dir.path().join("Warranty_and_Parts_info_AB_12_34.xlsx"));

        let (names, rows) = read_sheet(&path);
        assert_eq!(names, vec!["Warranty and Parts Info".to_string()]);
        assert_eq!(rows[0][0], text("Warranty Name"));
        assert_eq!(rows[1][0], text("PF2ABCDE"));
        assert_eq!(rows[1][8], text("N/A"));
        assert_eq!(rows[1][10], text("Yes"));
        assert_eq!(rows[2][0], text("Depot"));
        assert_eq!(rows[2][8], text("Expired"));
        assert!(rows[3].iter().all(|c| *c == Data::Empty), "blank separator row");
        assert_eq!(rows[4][0], text("Part ID"));
        assert_eq!(rows[5][..4], [text("X"), text("Keyboard"), text("Y"), text("KEYBOARD")]);
        assert_eq!(rows.len(), 6, "duplicate as-built part is dropped");

        // Expired entitlement in red, the first commodity group in the first palette color
        let styles = read_styles(&path);
        assert!(styles.contains(r#"patternType="solid""#));
        assert!(styles.contains(r#"rgb="FFFF0000""#));
        assert!(styles.contains(r#"rgb="FFFFDDC1""#));

        let calls = transport.calls.borrow();
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[2], config.endpoints.parts_model);
        assert_eq!(calls[3], config.endpoints.parts_as_built);
    }

    #[test]
    fn test_missing_parts_data_is_empty_not_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), "PF2ABCDE", ExportFormat::Xlsx);
        let transport =
            StubTransport::new(&config.endpoints, r#"{"Name": "T14 Type 20XK"}"#, warranty_response(json!(null)))
                .with(&config.endpoints.parts_model, json!({"msg": "no parts"}))
                .with(&config.endpoints.parts_as_built, json!({"data": null}));

        assert!(run(&config, &transport, today()).unwrap().is_file());
    }

    #[test]
    fn test_parts_error_status_still_writes_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let warranty = warranty_response(json!([{"name": "Depot", "endDate": "2099-01-01"}]));
        let base = serve(vec![
            ("mse/getproducts", "200 OK", r#"{"Name": "ThinkPad T14 Type 20XK - Intel"}"#.to_string()),
            ("upsell/redport/getIbaseInfo", "200 OK", warranty.to_string()),
            ("parts/model", "500 Internal Server Error", r#"{"code":500,"msg":"no parts"}"#.to_string()),
            ("parts/asBuilt", "200 OK", json!({"data": [{"id": "Y", "name": "Battery"}]}).to_string()),
        ]);
        let mut config = config(dir.path(), "PF2ABCDE", ExportFormat::Xlsx);
        config.endpoints = Endpoints::new(&base);

        let path = run(&config, &HttpTransport::new(), today()).expect("run should succeed");
        let (_, rows) = read_sheet(&path);
        assert_eq!(rows[2][8], text("Active"));
        assert_eq!(rows[4][0], text("Part ID"));
        assert_eq!(rows[5][0], text("Y"));
        assert_eq!(rows.len(), 6);
    }

    #[test]
    fn test_error_envelope_from_stub_is_no_parts() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), "PF2ABCDE", ExportFormat::Xlsx);
        let transport =
            StubTransport::new(&config.endpoints, r#"{"Name": "T14 Type 20XK"}"#, warranty_response(json!([])))
                .with(&config.endpoints.parts_model, json!({"code": 500, "msg": "no parts"}))
                .with(&config.endpoints.parts_as_built, json!({"code": 500, "msg": "no parts"}));

        let (_, rows) = read_sheet(&run(&config, &transport, today()).unwrap());
        assert_eq!(rows.last().unwrap()[0], text("Part ID"));
    }
}
