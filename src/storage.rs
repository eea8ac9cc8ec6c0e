pub mod database;
pub mod repository;

// 只匯出必要的數據庫功能
pub use database::*;

// 匯出查詢接口和實現
pub use repository::{
    DbExecutor,
    FeeLookup,
    InMemoryOrderStore,
    MySqlOrderRepository,
    OrderQuery,
    TableNames,
    TimeRange,
};
