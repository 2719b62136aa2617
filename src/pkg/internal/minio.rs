use std::time::Duration;

use aws_sdk_s3::{
    config::{Credentials, Region},
    presigning::PresigningConfig,
    primitives::ByteStream,
    Client,
};
use axum::http::StatusCode;
use standard_error::{Interpolate, StandardError, Status};

use crate::{conf::settings, prelude::Result};

//works against MinIO locally and AWS in production
pub async fn client() -> Client {
    let creds = Credentials::new(
        &settings.s3_access_key,
        &settings.s3_secret_key,
        None,
        None,
        "resumebox-static",
    );
    let shared = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(settings.s3_region.clone()))
        .credentials_provider(creds)
        .endpoint_url(&settings.s3_endpoint)
        .load()
        .await;
    let conf = aws_sdk_s3::config::Builder::from(&shared)
        .force_path_style(true)
        .build();
    Client::from_conf(conf)
}

pub async fn create_bucket(
    client: &aws_sdk_s3::Client,
    bucket_name: &str,
) -> Result<Option<aws_sdk_s3::operation::create_bucket::CreateBucketOutput>> {
    let constraint =
        aws_sdk_s3::types::BucketLocationConstraint::from(settings.s3_region.to_string().as_str());
    let cfg = aws_sdk_s3::types::CreateBucketConfiguration::builder()
        .location_constraint(constraint)
        .build();
    let create = client
        .create_bucket()
        .create_bucket_configuration(cfg)
        .bucket(bucket_name)
        .send()
        .await;
    create.map(Some).or_else(|err| {
        if err
            .as_service_error()
            .map(|se| se.is_bucket_already_exists() || se.is_bucket_already_owned_by_you())
            == Some(true)
        {
            Ok(None)
        } else {
            Err(StandardError::new("ERR-S3-001"))
        }
    })
}

pub trait S3Ops {
    async fn object_exists(&self, bucket: &str, key: &str) -> Result<()>;
    async fn upload_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<()>;
    async fn signed_url(&self, bucket: &str, key: &str, ttl_secs: u64) -> Result<String>;
}

impl S3Ops for Client {
    //existence check only, body stays in the store
    async fn object_exists(&self, bucket: &str, key: &str) -> Result<()> {
        let head = self.head_object().bucket(bucket).key(key).send().await;
        match head {
            Ok(_) => Ok(()),
            Err(err) => {
                if err.as_service_error().map(|se| se.is_not_found()) == Some(true) {
                    Err(StandardError::new("ERR-STORE-001").code(StatusCode::NOT_FOUND))
                } else {
                    Err(StandardError::new("ERR-S3-000").interpolate_err(err.to_string()))
                }
            }
        }
    }

    async fn upload_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        self.put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| StandardError::new("ERR-STORE-003").interpolate_err(e.to_string()))?;
        tracing::debug!("uploaded {} to bucket {}", key, bucket);
        Ok(())
    }

    async fn signed_url(&self, bucket: &str, key: &str, ttl_secs: u64) -> Result<String> {
        let conf = PresigningConfig::expires_in(Duration::from_secs(ttl_secs))
            .map_err(|_| StandardError::new("ERR-STORE-002"))?;
        let request = self
            .get_object()
            .bucket(bucket)
            .key(key)
            .presigned(conf)
            .await
            .map_err(|e| StandardError::new("ERR-STORE-002").interpolate_err(e.to_string()))?;
        Ok(request.uri().to_string())
    }
}
