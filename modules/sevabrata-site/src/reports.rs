use sevabrata_common::AnnualReport;

/// Published annual reports. The PDFs live on the content host; the list
/// itself ships with the binary because there is no reports manifest yet.
// TODO: read from annual-reports/manifest.json once the content repo adds one
pub fn builtin_reports() -> Vec<AnnualReport> {
    vec![AnnualReport {
        id: "sevabrata-activity-report-2019-2024".to_string(),
        title: "Sevabrata Activity Report 2019-2024".to_string(),
        description: "Comprehensive report covering our activities, impact, and achievements \
                      from 2019 to 2024. Includes detailed financial information, success \
                      stories, and future plans."
            .to_string(),
        file_name: "Sevabrata Activity Report 2019_2024_v03.pdf".to_string(),
        file_path: "annual-reports/Sevabrata%20Activity%20Report%202019_2024_v03.pdf".to_string(),
        file_size: "1.4 MB".to_string(),
        publish_date: "2024-12-01".to_string(),
        year: "2019-2024".to_string(),
        pages: 45,
        highlights: vec![
            "Helped 125+ families with medical assistance".to_string(),
            "Raised ₹85+ lakhs for critical treatments".to_string(),
            "Supported 40+ students through SAS program".to_string(),
            "Conducted 15+ awareness sessions".to_string(),
        ],
    }]
}
