#![allow(non_snake_case)]

// Базовые модули
pub mod config;
pub mod consts;
pub mod error;
pub mod metrics;

// Схема записей и политика отображения
pub mod model;
pub mod view;
pub mod pagination;

// Хранилище байтов и формат значений
pub mod kv;     // src/kv/{mod,mem,file,batch}.rs
pub mod lock;
pub mod codec;
pub mod seed;
pub mod table;

// Ядро: постраничное хранилище + подписки
pub mod store;  // src/store/{mod,core,view,mutate,query}.rs
pub mod subs;

// Проверки полей записи (форма)
pub mod validate;

// Удобные реэкспорты
pub use config::{RosterConfig, StoreBuilder};
pub use error::{Result, StoreError};
pub use kv::{FileKv, KvBackend, MemKv, WriteBatch};
pub use model::{Department, Employee, EmployeeId, EmployeePatch, NewEmployee, Position};
pub use pagination::{PageLink, PaginationState};
pub use store::{RosterStore, Snapshot};
pub use subs::SubscriptionHandle;
pub use view::{items_per_page, ViewMode};
