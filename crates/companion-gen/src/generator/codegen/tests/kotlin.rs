use super::{HEADER, companion, detail_fragment, picker_activity, user_activity};
use crate::generator::{
  ast::{DialectSelection, SharedElement},
  codegen::KotlinRenderer,
};

const USER_FIELDS: &[(&str, &str, bool)] = &[
  ("userId", "int", true),
  ("title", "String", false),
  ("subtitle", "String", false),
];

#[test]
fn test_kotlin_file_layout_and_start() {
  let companion = companion(user_activity(), USER_FIELDS, DialectSelection::BOTH);
  let code = KotlinRenderer::new(&companion).render(HEADER);

  let expected = "\
// AUTO-GENERATED CODE - DO NOT EDIT!
// Source: test.json
// Generated by `companion-gen`

package com.example.app

import android.app.Activity
import android.content.Context
import android.content.Intent
import android.view.View
import androidx.fragment.app.Fragment
import com.companion.runtime.ActivityBuilder

fun Context.startUserActivity(userId: Int, title: String, subtitle: String) {
    ActivityBuilder.init(this)
    val intent = Intent(this, UserActivity::class.java)
    intent.putExtra(\"userId\", userId)
    intent.putExtra(\"title\", title)
    intent.putExtra(\"subtitle\", subtitle)
    if (this is Activity) {
        startActivity(intent)
    } else {
        intent.addFlags(Intent.FLAG_ACTIVITY_NEW_TASK)
        startActivity(intent)
    }
    ActivityBuilder.inject()
}

fun View.startUserActivity(userId: Int, title: String, subtitle: String) {
    context.startUserActivity(userId, title, subtitle)
}

fun Fragment.startUserActivity(userId: Int, title: String, subtitle: String) {
    activity?.startUserActivity(userId, title, subtitle)
}

fun Context.startUserActivityWithOptionalTitle(userId: Int, title: String) {
";
  assert!(code.starts_with(expected), "unexpected output:\n{code}");
  assert!(code.contains("fun Context.startUserActivityWithOptionalSubtitle(userId: Int, subtitle: String) {"));
  assert!(code.contains("fun Context.startUserActivityWithoutOptional(userId: Int) {"));
  assert!(!code.contains("inject(instance"));
  assert!(!code.contains(';'));
}

#[test]
fn test_kotlin_result_contract() {
  let companion = companion(picker_activity(), &[("initial", "int", false)], DialectSelection::KOTLIN);
  let code = KotlinRenderer::new(&companion).render(HEADER);

  assert!(code.contains(
    "fun Context.startPickerActivity(initial: Int, \
     onPickerActivityResultListener: PickerActivityBuilder.OnPickerActivityResultListener? = null) {"
  ));
  let expected_launch = "\
    if (this is Activity) {
        if (onPickerActivityResultListener == null) {
            (this as Activity).startActivityForResult(intent, 1)
        } else {
            ActivityBuilder.startActivityForResult((this as Activity), intent, object : OnActivityResultListener {
                override fun onResult(resultCode: Int, data: Bundle?) {
                    if (resultCode == Activity.RESULT_OK) {
                        onPickerActivityResultListener.onResult(BundleUtils.get<Int>(data, \"color\")!!, BundleUtils.get<String>(data, \"label\"))
                    }
                }
            })
        }
    } else {
";
  assert!(code.contains(expected_launch), "missing launch:\n{code}");

  let expected_finish = "\
/**
 * Finishes PickerActivity with 2 result value(s).
 */
fun PickerActivity.finishWithResult(color: Int, label: String) {
    val intent = Intent()
    intent.putExtra(\"color\", color)
    intent.putExtra(\"label\", label)
    setResult(Activity.RESULT_OK, intent)
    ActivityCompat.finishAfterTransition(this)
}
";
  assert!(code.ends_with(expected_finish), "missing finishWithResult:\n{code}");
}

#[test]
fn test_kotlin_fragment_show() {
  let shared = vec![
    SharedElement::from_parts(7, None, "hero").unwrap(),
    SharedElement::from_parts(0, Some("$caption"), "detail").unwrap(),
  ];
  let companion = companion(
    detail_fragment(shared),
    &[("itemId", "long", true), ("ids", "int[]", false), ("names", "String[]", false)],
    DialectSelection::KOTLIN,
  );
  let code = KotlinRenderer::new(&companion).render(HEADER);

  assert!(code.contains("fun Activity.showDetailFragment(containerId: Int, itemId: Long, ids: IntArray, names: Array<String>) {"));
  assert!(code.contains("    if (this is FragmentActivity) {\n"));
  assert!(code.contains("        val sharedElements: ArrayList<Pair<String, String>> = ArrayList()\n"));
  assert!(code.contains("        val container: View = findViewById<View>(containerId)\n"));
  assert!(code.contains(
    "        sharedElements.add(Pair(ViewCompat.getTransitionName(container.findViewById<View>(7))!!, \"hero\"))\n"
  ));
  assert!(code.contains("        sharedElements.add(Pair(\"\\$caption\", \"detail\"))\n"));
  assert!(code.contains(
    "        FragmentBuilder.showFragment((this as FragmentActivity), containerId, intent.extras, \
     DetailFragment::class.java, sharedElements)\n"
  ));
  assert!(code.contains("fun Activity.showDetailFragmentWithOptionalIds(containerId: Int, itemId: Long, ids: IntArray) {"));
  assert!(!code.contains("fun View."));
}

#[test]
fn test_kotlin_escapes_keyword_parameters() {
  let companion = companion(user_activity(), &[("object", "String", true)], DialectSelection::KOTLIN);
  let code = KotlinRenderer::new(&companion).render(HEADER);

  assert!(code.contains("fun Context.startUserActivity(`object`: String) {"));
  assert!(code.contains("    intent.putExtra(\"object\", `object`)\n"));
  assert!(code.contains("    context.startUserActivity(`object`)\n"));
}

#[test]
fn test_kotlin_maps_java_lang_types() {
  let companion = companion(
    user_activity(),
    &[
      ("count", "Integer", true),
      ("payload", "Object", true),
      ("lookup", "java.util.HashMap<String, Long>", true),
    ],
    DialectSelection::KOTLIN,
  );
  let code = KotlinRenderer::new(&companion).render(HEADER);

  assert!(code.contains("count: Int, payload: Any, lookup: HashMap<String, Long>"));
  assert!(code.contains("import java.util.HashMap\n"));
  assert!(!code.contains("import java.lang"));
}

#[test]
fn test_kotlin_render_is_deterministic() {
  let fields = &[("initial", "int", false), ("label", "String", false)];
  let first = KotlinRenderer::new(&companion(picker_activity(), fields, DialectSelection::BOTH)).render(HEADER);
  let second = KotlinRenderer::new(&companion(picker_activity(), fields, DialectSelection::BOTH)).render(HEADER);
  assert_eq!(first, second);
}
