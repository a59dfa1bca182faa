//! Backend response bodies used across tests

use serde_json::{Value, json};

/// Analytics snapshot with round numbers and a small high-risk bucket
pub fn analytics_body() -> Value {
    json!({
        "usageStatistics": {
            "totalUsers": 12345,
            "activeUsers": 678,
            "totalDoctors": 42,
            "newUsers": 17,
            "totalAnalyses": 9001,
            "averageAnalysesPerDay": 300.0,
            "analysisStatus": {"pending": 4, "processing": 2, "completed": 8990, "failed": 5}
        },
        "errorRate": {
            "totalRequests": 120000,
            "failedRequests": 240,
            "errorRate": 0.2,
            "errorsByType": {"Timeout": 200}
        },
        "imageCount": {
            "totalImages": 9100,
            "processedImages": 9001,
            "pendingImages": 60,
            "failedImages": 39
        },
        "riskDistribution": {
            "minimal": 5000, "low": 3600, "medium": 300, "high": 100, "total": 9000,
            "minimalPercentage": 55.56, "lowPercentage": 40.0,
            "mediumPercentage": 3.33, "highPercentage": 1.11
        }
    })
}

/// One audit record with JSON snapshots
pub fn audit_record(id: &str) -> Value {
    json!({
        "id": id,
        "createdAt": "2024-05-01T10:15:00Z",
        "adminId": "adm-1",
        "actionType": "UPDATE_USER",
        "resourceType": "User",
        "resourceId": "u-42",
        "ipAddress": "10.0.0.8",
        "userAgent": "Mozilla/5.0 (TestAgent)",
        "oldValues": "{\"role\":\"user\"}",
        "newValues": "{\"role\":\"doctor\"}"
    })
}

/// Audit page with the given records
pub fn audit_page_body(records: Vec<Value>, total_count: u64, page: u32) -> Value {
    json!({
        "logs": records,
        "totalCount": total_count,
        "page": page,
        "pageSize": 20
    })
}
