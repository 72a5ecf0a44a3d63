//! The model currently being configured
//!
//! `ModelItem::columns`, `filters` and `form` install their descriptor here for
//! the duration of the callback, so free builder functions such as
//! [`column::string`](crate::column::string) know where to register. Blocks
//! nest: leaving a block restores whatever was current before it, also when
//! the callback returns early with an error or panics.

use crate::error::{AdminError, AdminResult};
use crate::model_item::ModelItem;
use std::cell::RefCell;

// Slot for the descriptor being configured on this thread
thread_local! {
	static CURRENT: RefCell<Option<ModelItem>> = const { RefCell::new(None) };
}

/// The descriptor currently being configured, if any
pub fn current() -> Option<ModelItem> {
	CURRENT.with(|slot| slot.borrow().clone())
}

/// Run `f` against the current descriptor.
///
/// `builder` names the calling builder in the error returned outside a
/// configuration block.
pub fn with_current<R>(builder: &str, f: impl FnOnce(&ModelItem) -> R) -> AdminResult<R> {
	let item = current().ok_or_else(|| AdminError::NoCurrentModel(builder.to_string()))?;
	Ok(f(&item))
}

/// Scope during which a descriptor is current.
///
/// The previously current descriptor is restored when the guard is dropped.
///
/// # Examples
///
/// ```
/// use reinhardt_model_admin::context::{self, ContextGuard};
/// use reinhardt_model_admin::{AdminModel, AdminSite};
///
/// struct Page;
/// impl AdminModel for Page {}
///
/// let site = AdminSite::new("Admin");
/// let page = site.model::<Page>();
///
/// {
///     let _guard = ContextGuard::enter(&page);
///     assert!(context::current().is_some_and(|item| item.ptr_eq(&page)));
/// }
/// assert!(context::current().is_none());
/// ```
#[must_use = "the descriptor stops being current as soon as the guard is dropped"]
pub struct ContextGuard {
	previous: Option<ModelItem>,
}

impl ContextGuard {
	pub fn enter(item: &ModelItem) -> Self {
		let previous = CURRENT.with(|slot| slot.replace(Some(item.clone())));
		tracing::trace!(model = item.model_class(), "entered configuration block");
		Self { previous }
	}
}

impl Drop for ContextGuard {
	fn drop(&mut self) {
		let previous = self.previous.take();
		// The slot may already be gone while the thread is shutting down.
		let _ = CURRENT.try_with(|slot| {
			if let Ok(mut slot) = slot.try_borrow_mut() {
				*slot = previous;
			}
		});
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::AdminModel;
	use crate::site::AdminSite;
	use rstest::rstest;
	use std::panic::{AssertUnwindSafe, catch_unwind};

	struct Outer;
	impl AdminModel for Outer {}

	struct Inner;
	impl AdminModel for Inner {}

	#[rstest]
	fn nothing_is_current_by_default() {
		assert!(current().is_none());
		assert_eq!(
			with_current("column::string", |_| ()),
			Err(AdminError::NoCurrentModel("column::string".to_string()))
		);
	}

	#[rstest]
	fn guards_nest_and_restore() {
		// Arrange
		let site = AdminSite::new("Admin");
		let outer = site.model::<Outer>();
		let inner = site.model::<Inner>();

		// Act & Assert
		{
			let _outer = ContextGuard::enter(&outer);
			{
				let _inner = ContextGuard::enter(&inner);
				assert!(current().unwrap().ptr_eq(&inner));
			}
			assert!(current().unwrap().ptr_eq(&outer));
		}
		assert!(current().is_none());
	}

	#[rstest]
	fn guard_restores_after_panic() {
		// Arrange
		let site = AdminSite::new("Admin");
		let outer = site.model::<Outer>();
		let inner = site.model::<Inner>();
		let _outer = ContextGuard::enter(&outer);

		// Act
		let result = catch_unwind(AssertUnwindSafe(|| {
			let _inner = ContextGuard::enter(&inner);
			panic!("callback failed");
		}));

		// Assert
		assert!(result.is_err());
		assert!(current().unwrap().ptr_eq(&outer));
	}
}
