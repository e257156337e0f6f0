//! Platform and runtime-library classes referenced by generated code.

use super::ast::{ClassName, TypeRef};

pub const DEFAULT_RUNTIME_PACKAGE: &str = "com.companion.runtime";

/// Request code passed to `startActivityForResult` when no listener is registered.
pub const DEFAULT_REQUEST_CODE: i64 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeTypes {
  pub context: ClassName,
  pub activity: ClassName,
  pub fragment_activity: ClassName,
  pub fragment: ClassName,
  pub intent: ClassName,
  pub bundle: ClassName,
  pub view: ClassName,
  pub view_compat: ClassName,
  pub activity_compat: ClassName,
  pub pair: ClassName,
  pub array_list: ClassName,
  pub object: ClassName,
  pub activity_builder: ClassName,
  pub fragment_builder: ClassName,
  pub bundle_utils: ClassName,
  pub on_activity_result_listener: ClassName,
}

impl RuntimeTypes {
  pub fn new(runtime_package: &str) -> Self {
    Self {
      context: ClassName::new("android.content", "Context"),
      activity: ClassName::new("android.app", "Activity"),
      fragment_activity: ClassName::new("androidx.fragment.app", "FragmentActivity"),
      fragment: ClassName::new("androidx.fragment.app", "Fragment"),
      intent: ClassName::new("android.content", "Intent"),
      bundle: ClassName::new("android.os", "Bundle"),
      view: ClassName::new("android.view", "View"),
      view_compat: ClassName::new("androidx.core.view", "ViewCompat"),
      activity_compat: ClassName::new("androidx.core.app", "ActivityCompat"),
      pair: ClassName::new("androidx.core.util", "Pair"),
      array_list: ClassName::new("java.util", "ArrayList"),
      object: ClassName::new("java.lang", "Object"),
      activity_builder: ClassName::new(runtime_package, "ActivityBuilder"),
      fragment_builder: ClassName::new(runtime_package, "FragmentBuilder"),
      bundle_utils: ClassName::new(runtime_package, "BundleUtils"),
      on_activity_result_listener: ClassName::new(runtime_package, "OnActivityResultListener"),
    }
  }

  /// `ArrayList<Pair<String, String>>`
  #[must_use]
  pub fn shared_element_list(&self) -> TypeRef {
    TypeRef::generic(
      self.array_list.clone(),
      vec![TypeRef::generic(self.pair.clone(), vec![TypeRef::string(), TypeRef::string()])],
    )
  }
}

impl Default for RuntimeTypes {
  fn default() -> Self {
    Self::new(DEFAULT_RUNTIME_PACKAGE)
  }
}
