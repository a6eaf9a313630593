//! # Core Framework Module
//!
//! 백엔드 서비스를 위한 핵심 프레임워크 기능을 제공하는 모듈입니다.
//! Spring Framework의 핵심 컨테이너 기능을 Rust 생태계에 맞게 구현한
//! 의존성 주입 시스템을 제공합니다.
//!
//! ## 모듈 구성
//!
//! ### [`registry`] - 의존성 주입 컨테이너
//! - **ServiceLocator**: Spring의 ApplicationContext + BeanFactory 역할
//! - **Component**: `build()`로 의존성을 직접 조립하는 컴포넌트 trait
//! - **자동 레지스트리**: `inventory` 기반 컴파일 타임 등록 (`register_component!`)
//! - **순환 참조 감지**: 생성 중인 타입을 추적하여 에러로 보고
//!
//! ## Spring Framework와의 비교
//!
//! | Spring | 이 프레임워크 |
//! |--------|---------------|
//! | `@Component` / `@Service` | `impl Component` + `register_component!` |
//! | `ApplicationContext` | `ServiceLocator` |
//! | `@Autowired` 생성자 주입 | `Component::build()` 안의 `ServiceLocator::resolve` |
//! | `@Bean` (외부 라이브러리) | `ServiceLocator::set()` |
//! | `@ConditionalOnProperty` | `ServiceLocator::try_get()` 결과가 `None`인 경우 처리 |
//!
//! ## 애플리케이션 초기화
//!
//! ```rust,ignore
//! ServiceLocator::set(Arc::new(Database::new().await?));
//! ServiceLocator::set(Arc::new(RedisClient::new().await?));
//!
//! ServiceLocator::initialize_all()?;
//! ```
//!
//! ## 트러블슈팅
//!
//! ### 순환 참조 감지
//! ```text
//! ❌ Circular dependency detected for type: UserService
//! ```
//! **해결**: 서비스 계층 구조를 재설계하여 단방향 의존성으로 변경
//!
//! ### 미등록 타입 에러
//! ```text
//! Internal server error: Database is not registered. Register it with ServiceLocator::set() before use
//! ```
//! **해결**: `main`에서 인프라 인스턴스를 `ServiceLocator::set()`으로 등록

pub mod registry;

pub use crate::errors::errors::*;
pub use registry::*;
