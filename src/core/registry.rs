//! # Service Registry
//!
//! Spring의 `ApplicationContext` 역할을 하는 타입 기반 서비스 로케이터입니다.
//!
//! ## 등록 방식
//!
//! | 종류 | 방법 | 예 |
//! |------|------|----|
//! | 인프라 (DB, Redis, 브로커, 메일러) | `ServiceLocator::set(Arc<T>)` | `Database`, `RedisClient` |
//! | 컴포넌트 (리포지토리, 서비스) | `Component` 구현 + `register_component!` | `UserService` |
//!
//! 컴포넌트는 처음 요청될 때 `Component::build()`로 생성되어 캐시됩니다.
//! `register_component!`는 `inventory`에 등록 정보를 제출하므로
//! `ServiceLocator::initialize_all()`이 시작 시점에 모든 컴포넌트를 미리 생성합니다.
//!
//! ```rust,ignore
//! impl Component for UserService {
//!     fn build() -> AppResult<Self> {
//!         let store = ServiceLocator::resolve::<UserRepository>()?;
//!         Ok(UserService::new(store))
//!     }
//! }
//!
//! register_component!(UserService, "user_service", ComponentKind::Service);
//!
//! let service = UserService::instance();
//! ```

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;

use crate::errors::errors::{AppError, AppResult};
use crate::utils::display_terminal::{
    print_boxed_title, print_final_summary, print_step_complete, print_step_start, print_sub_task,
};

/// 레지스트리가 생성할 수 있는 컴포넌트
///
/// 의존성은 `build()` 안에서 `ServiceLocator::resolve`/`require`로 가져옵니다.
pub trait Component: Send + Sync + Sized + 'static {
    fn build() -> AppResult<Self>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    Repository,
    Service,
}

/// `inventory`로 수집되는 컴포넌트 등록 정보
pub struct ComponentRegistration {
    pub name: &'static str,
    pub kind: ComponentKind,
    pub initializer: fn() -> AppResult<()>,
}

inventory::collect!(ComponentRegistration);

/// 컴포넌트를 레지스트리에 등록하고 `instance()` 접근자를 생성합니다.
#[macro_export]
macro_rules! register_component {
    ($ty:ty, $name:expr, $kind:expr) => {
        ::inventory::submit! {
            $crate::core::registry::ComponentRegistration {
                name: $name,
                kind: $kind,
                initializer: {
                    fn initialize() -> $crate::errors::errors::AppResult<()> {
                        $crate::core::registry::ServiceLocator::resolve::<$ty>().map(|_| ())
                    }
                    initialize
                },
            }
        }

        impl $ty {
            /// 레지스트리에서 싱글톤 인스턴스를 가져옵니다.
            pub fn instance() -> ::std::sync::Arc<$ty> {
                $crate::core::registry::ServiceLocator::get::<$ty>()
            }
        }
    };
}

pub struct ServiceLocator {
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
    initializing: RwLock<HashSet<TypeId>>,
}

static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);

impl ServiceLocator {
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
            initializing: RwLock::new(HashSet::new()),
        }
    }

    /// 인스턴스를 직접 등록합니다. 같은 타입이 이미 있으면 교체합니다.
    pub fn set<T: Send + Sync + 'static>(instance: Arc<T>) {
        log::info!("📦 Registering: {}", short_type_name::<T>());

        if let Ok(mut instances) = LOCATOR.instances.write() {
            instances.insert(TypeId::of::<T>(), instance as Arc<dyn Any + Send + Sync>);
        }
    }

    /// 등록된 인스턴스를 조회합니다. 생성은 하지 않습니다.
    pub fn try_get<T: Send + Sync + 'static>() -> Option<Arc<T>> {
        let instances = LOCATOR.instances.read().ok()?;
        instances
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|instance| instance.downcast::<T>().ok())
    }

    /// 수동 등록된 인프라 인스턴스를 가져옵니다.
    pub fn require<T: Send + Sync + 'static>() -> AppResult<Arc<T>> {
        Self::try_get::<T>().ok_or_else(|| {
            AppError::InternalError(format!(
                "{} is not registered. Register it with ServiceLocator::set() before use",
                short_type_name::<T>()
            ))
        })
    }

    /// 컴포넌트를 가져오고, 없으면 생성하여 캐시합니다.
    pub fn resolve<T: Component>() -> AppResult<Arc<T>> {
        if let Some(instance) = Self::try_get::<T>() {
            return Ok(instance);
        }

        let type_id = TypeId::of::<T>();
        {
            let mut initializing = LOCATOR
                .initializing
                .write()
                .map_err(|_| AppError::InternalError("registry lock poisoned".to_string()))?;

            if !initializing.insert(type_id) {
                log::error!("❌ Circular dependency detected for type: {}", short_type_name::<T>());
                return Err(AppError::InternalError(format!(
                    "Circular dependency detected: {} is already being initialized",
                    short_type_name::<T>()
                )));
            }
        }

        let built = T::build();

        if let Ok(mut initializing) = LOCATOR.initializing.write() {
            initializing.remove(&type_id);
        }

        let instance = Arc::new(built?);

        let mut instances = LOCATOR
            .instances
            .write()
            .map_err(|_| AppError::InternalError("registry lock poisoned".to_string()))?;

        // 생성 도중 다른 스레드가 먼저 등록했다면 그 인스턴스를 사용
        let entry = instances
            .entry(type_id)
            .or_insert_with(|| instance as Arc<dyn Any + Send + Sync>)
            .clone();

        entry
            .downcast::<T>()
            .map_err(|_| AppError::InternalError(format!("Type mismatch in ServiceLocator: {}", short_type_name::<T>())))
    }

    /// `resolve`와 같지만 실패 시 패닉합니다.
    ///
    /// 핸들러에서 사용하는 `instance()` 접근자가 호출합니다.
    /// `initialize_all()`이 성공한 뒤에는 실패하지 않습니다.
    pub fn get<T: Component>() -> Arc<T> {
        match Self::resolve::<T>() {
            Ok(instance) => instance,
            Err(e) => panic!("Failed to create instance for {}: {}", short_type_name::<T>(), e),
        }
    }

    /// 등록된 모든 컴포넌트를 생성합니다. 리포지토리가 서비스보다 먼저 생성됩니다.
    pub fn initialize_all() -> AppResult<()> {
        print_boxed_title("🔄 INITIALIZING SERVICE REGISTRY");

        let repositories = Self::initialize_kind(1, ComponentKind::Repository, "Repository")?;
        let services = Self::initialize_kind(2, ComponentKind::Service, "Service")?;

        print_final_summary(repositories, services);

        Ok(())
    }

    fn initialize_kind(step: u8, kind: ComponentKind, label: &str) -> AppResult<usize> {
        let registrations: Vec<&ComponentRegistration> = inventory::iter::<ComponentRegistration>()
            .filter(|registration| registration.kind == kind)
            .collect();

        if registrations.is_empty() {
            return Ok(0);
        }

        print_step_start(step, &format!("Creating {} instances", label));

        for registration in &registrations {
            print_sub_task(registration.name, "Creating...");
            (registration.initializer)().map_err(|e| {
                log::error!("❌ {} 생성 실패: {}", registration.name, e);
                e
            })?;
            print_sub_task(registration.name, "✓ Created");
        }

        print_step_complete(step, &format!("{} instances created", label), registrations.len());

        Ok(registrations.len())
    }
}

fn short_type_name<T>() -> &'static str {
    let type_name = std::any::type_name::<T>();
    match type_name.rfind("::") {
        Some(pos) => &type_name[pos + 2..],
        None => type_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static BUILD_COUNT: AtomicUsize = AtomicUsize::new(0);

    struct CountingComponent;

    impl Component for CountingComponent {
        fn build() -> AppResult<Self> {
            BUILD_COUNT.fetch_add(1, Ordering::SeqCst);
            Ok(CountingComponent)
        }
    }

    struct FailingComponent;

    impl Component for FailingComponent {
        fn build() -> AppResult<Self> {
            Err(AppError::InternalError("no database".to_string()))
        }
    }

    struct CycleA;
    struct CycleB;

    impl Component for CycleA {
        fn build() -> AppResult<Self> {
            ServiceLocator::resolve::<CycleB>()?;
            Ok(CycleA)
        }
    }

    impl Component for CycleB {
        fn build() -> AppResult<Self> {
            ServiceLocator::resolve::<CycleA>()?;
            Ok(CycleB)
        }
    }

    struct Infra(u32);

    #[test]
    fn test_component_is_built_once() {
        let first = ServiceLocator::resolve::<CountingComponent>().unwrap();
        let second = ServiceLocator::resolve::<CountingComponent>().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(BUILD_COUNT.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_build_failure_is_propagated_and_not_cached() {
        assert!(ServiceLocator::resolve::<FailingComponent>().is_err());
        assert!(ServiceLocator::try_get::<FailingComponent>().is_none());
    }

    #[test]
    fn test_circular_dependency_is_detected() {
        let result = ServiceLocator::resolve::<CycleA>();

        match result {
            Err(AppError::InternalError(msg)) => assert!(msg.contains("Circular dependency")),
            _ => panic!("Expected circular dependency error"),
        }
    }

    #[test]
    fn test_set_and_require_infrastructure() {
        ServiceLocator::set(Arc::new(Infra(7)));

        assert_eq!(ServiceLocator::require::<Infra>().unwrap().0, 7);
        assert!(ServiceLocator::require::<String>().is_err());
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name::<Infra>(), "Infra");
    }
}
