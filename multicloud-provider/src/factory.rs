//! Native client construction.
//!
//! How clients authenticate is decided outside this crate. Adapters only see a
//! [`ClientFactory`] that turns a [`Selector`] into a ready client.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::Result;
use crate::traits::{ClientError, ErrorContext, ProviderErrorMapper};
use crate::types::Selector;

/// Builds (or looks up) the native client for a selector.
pub trait ClientFactory<C: ?Sized>: Send + Sync {
    fn client(&self, selector: &Selector) -> std::result::Result<Arc<C>, ClientError>;
}

/// Factory backed by a closure.
pub struct FnClientFactory<F>(F);

/// Wrap a closure as a [`ClientFactory`].
///
/// ```rust,ignore
/// let factory = client_factory_fn(|sel: &Selector| build_route53(sel));
/// ```
pub fn client_factory_fn<F>(f: F) -> FnClientFactory<F> {
    FnClientFactory(f)
}

impl<C, F> ClientFactory<C> for FnClientFactory<F>
where
    C: ?Sized,
    F: Fn(&Selector) -> std::result::Result<Arc<C>, ClientError> + Send + Sync,
{
    fn client(&self, selector: &Selector) -> std::result::Result<Arc<C>, ClientError> {
        (self.0)(selector)
    }
}

/// Hands out the same client for every selector.
pub struct StaticClientFactory<C: ?Sized>(Arc<C>);

impl<C: ?Sized> StaticClientFactory<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self(client)
    }
}

impl<C: ?Sized + Send + Sync> ClientFactory<C> for StaticClientFactory<C> {
    fn client(&self, _selector: &Selector) -> std::result::Result<Arc<C>, ClientError> {
        Ok(Arc::clone(&self.0))
    }
}

/// Builds each (profile, region) client once and reuses it afterwards.
///
/// Failed constructions are not cached.
pub struct CachingClientFactory<C: ?Sized> {
    inner: Arc<dyn ClientFactory<C>>,
    clients: RwLock<HashMap<Selector, Arc<C>>>,
}

impl<C: ?Sized> CachingClientFactory<C> {
    pub fn new(inner: Arc<dyn ClientFactory<C>>) -> Self {
        Self {
            inner,
            clients: RwLock::new(HashMap::new()),
        }
    }
}

impl<C: ?Sized + Send + Sync> ClientFactory<C> for CachingClientFactory<C> {
    fn client(&self, selector: &Selector) -> std::result::Result<Arc<C>, ClientError> {
        if let Some(client) = self
            .clients
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(selector)
        {
            return Ok(Arc::clone(client));
        }

        let client = self.inner.client(selector)?;
        let mut clients = self.clients.write().unwrap_or_else(PoisonError::into_inner);
        // 并发构建时保留先写入的那个
        Ok(Arc::clone(
            clients.entry(selector.clone()).or_insert(client),
        ))
    }
}

/// Obtain a client, mapping construction failures through the provider's mapper.
pub(crate) fn obtain_client<C, M>(
    factory: &dyn ClientFactory<C>,
    mapper: &M,
    selector: &Selector,
) -> Result<Arc<C>>
where
    C: ?Sized,
    M: ProviderErrorMapper,
{
    factory
        .client(selector)
        .map_err(|e| mapper.map_client_error(e, ErrorContext::new("GetClient")))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    trait Greeter: Send + Sync {
        fn region(&self) -> String;
    }

    struct RegionGreeter(String);

    impl Greeter for RegionGreeter {
        fn region(&self) -> String {
            self.0.clone()
        }
    }

    #[test]
    fn closure_factory_sees_selector() {
        let factory = client_factory_fn(|sel: &Selector| {
            let region = sel.region.clone().unwrap_or_default();
            Ok(Arc::new(RegionGreeter(region)) as Arc<dyn Greeter>)
        });
        let client =
            ClientFactory::<dyn Greeter>::client(&factory, &Selector::default().with_region("eu-west-1"))
                .unwrap();
        assert_eq!(client.region(), "eu-west-1");
    }

    #[test]
    fn caching_factory_builds_once_per_selector() {
        let built = Arc::new(AtomicUsize::new(0));
        let counter = built.clone();
        let inner: Arc<dyn ClientFactory<dyn Greeter>> =
            Arc::new(client_factory_fn(move |sel: &Selector| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Arc::new(RegionGreeter(sel.region.clone().unwrap_or_default())) as Arc<dyn Greeter>)
            }));
        let cache = CachingClientFactory::new(inner);

        let a = Selector::profile("p").with_region("r1");
        let b = Selector::profile("p").with_region("r2");
        cache.client(&a).unwrap();
        cache.client(&a).unwrap();
        cache.client(&b).unwrap();
        assert_eq!(built.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn caching_factory_does_not_cache_failures() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = attempts.clone();
        let inner: Arc<dyn ClientFactory<dyn Greeter>> =
            Arc::new(client_factory_fn(move |_: &Selector| {
                counter.fetch_add(1, Ordering::SeqCst);
                Err::<Arc<dyn Greeter>, _>(ClientError::Transport("no credentials".into()))
            }));
        let cache = CachingClientFactory::new(inner);
        assert!(cache.client(&Selector::profile("p")).is_err());
        assert!(cache.client(&Selector::profile("p")).is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }
}
