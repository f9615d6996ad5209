//! Database Connection Management Module
//!
//! MongoDB 연결을 생성하고 리포지토리에 공유 핸들을 제공합니다.
//! 사용자 갱신 작업은 다중 문서 트랜잭션을 사용하므로
//! 레플리카 셋 또는 샤드 클러스터로 배포된 MongoDB가 필요합니다.
//!
//! # 기본 사용법
//!
//! ```rust,ignore
//! use crate::config::DataConfig;
//! use crate::db::Database;
//!
//! let database = Database::new(&DataConfig::from_env()).await?;
//! let users = UserRepository::new(database.clone());
//! users.create_indexes().await?;
//! ```

use log::info;
use mongodb::{Client, options::ClientOptions};

use crate::config::DataConfig;

/// MongoDB 데이터베이스 연결 래퍼
///
/// 내부 `Client`는 연결 풀을 공유하므로 복제 비용이 낮습니다.
#[derive(Clone)]
pub struct Database {
    client: Client,
    database_name: String,
}

impl Database {
    /// 새 MongoDB 데이터베이스 연결을 생성합니다.
    ///
    /// `ping` 명령으로 연결 상태를 확인한 후 인스턴스를 반환합니다.
    pub async fn new(config: &DataConfig) -> Result<Self, mongodb::error::Error> {
        let mut client_options = ClientOptions::parse(&config.mongodb_uri).await?;
        client_options.app_name = Some("user_auth_backend".to_string());

        let client = Client::with_options(client_options)?;

        client
            .database(&config.database_name)
            .run_command(mongodb::bson::doc! { "ping": 1 })
            .await?;

        info!("✅ MongoDB 연결 성공: {}", config.database_name);

        Ok(Self {
            client,
            database_name: config.database_name.clone(),
        })
    }

    /// 컬렉션 접근에 사용할 `mongodb::Database` 인스턴스를 반환합니다.
    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }

    /// 세션/트랜잭션 시작에 사용하는 클라이언트
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// 연결 풀을 정리합니다. 서버 종료 후 한 번 호출합니다.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
        info!("MongoDB 연결 종료");
    }
}
