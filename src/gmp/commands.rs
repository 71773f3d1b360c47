use quick_xml::escape::escape;

pub fn authenticate(username: &str, password: &str) -> String {
    format!(
        "<authenticate><credentials><username>{}</username><password>{}</password></credentials></authenticate>",
        escape(username),
        escape(password)
    )
}

pub fn get_host_assets(filter: &str) -> String {
    format!(r#"<get_assets type="host" filter="{}"/>"#, escape(filter))
}

pub fn get_results(filter: &str) -> String {
    format!(r#"<get_results details="0" filter="{}"/>"#, escape(filter))
}

pub fn get_vulns(filter: &str) -> String {
    format!(r#"<get_vulns filter="{}"/>"#, escape(filter))
}
