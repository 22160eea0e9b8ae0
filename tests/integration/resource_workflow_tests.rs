/*!
 * End-to-end tests for view and C# resource generation
 */

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use viewlingo::app_config::Config;
use viewlingo::resources::ResourceStore;
use viewlingo::translation::MockTranslator;

use crate::common;

fn languages() -> Vec<String> {
    vec!["xx".to_string()]
}

/// Every file under `root` with its content
fn snapshot(root: &Path) -> BTreeMap<String, String> {
    common::list_files(root)
        .into_iter()
        .map(|relative| {
            let content = fs::read_to_string(root.join(&relative)).unwrap();
            (relative, content)
        })
        .collect()
}

#[tokio::test]
async fn test_generate_view_resources_withNewView_shouldWriteStoreAndRewriteView() {
    let dir = common::create_temp_dir().unwrap();
    let root = dir.path();
    let view = common::create_test_view(root, "Views/Home/Index.cshtml").unwrap();
    common::create_test_file(root, "Views/_ViewImports.cshtml", "<p>Imports</p>\n").unwrap();
    let mock = Arc::new(MockTranslator::working());
    let controller = common::test_controller(Config::default(), mock.clone());

    let summary = controller.generate_view_resources(root, &languages(), true).await.unwrap();

    assert_eq!(summary.processed, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.stores_written, 1);
    assert_eq!(summary.files_written, 1);

    let store = ResourceStore::load(&root.join("Resources/Views/Home/Index.xx.resx"));
    assert_eq!(store.len(), 2);
    assert_eq!(store.get("Welcome"), Some("[xx] Welcome"));
    assert_eq!(
        store.get("Learn about building web apps."),
        Some("[xx] Learn about building web apps.")
    );

    let rewritten = fs::read_to_string(&view).unwrap();
    assert!(rewritten.starts_with("@{\n    ViewData[\"Title\"] = \"Home\";\n}\n"));
    assert!(rewritten.contains("<h1>@Localizer[\"Welcome\"]</h1>"));
    assert!(rewritten.contains("class=\"text-center\""));

    assert_eq!(
        fs::read_to_string(root.join("Views/_ViewImports.cshtml")).unwrap(),
        "<p>Imports</p>\n"
    );
    assert!(mock
        .requests()
        .iter()
        .all(|request| request.source_context.contains("<h1>Welcome</h1>")));
}

#[tokio::test]
async fn test_generate_view_resources_withSecondRun_shouldLeaveFilesUnchanged() {
    let dir = common::create_temp_dir().unwrap();
    let root = dir.path();
    common::create_test_view(root, "Views/Home/Index.cshtml").unwrap();
    let controller = common::test_controller(Config::default(), Arc::new(MockTranslator::working()));

    controller.generate_view_resources(root, &languages(), true).await.unwrap();
    let before = snapshot(root);

    let mock = Arc::new(MockTranslator::working());
    let controller = common::test_controller(Config::default(), mock.clone());
    let summary = controller.generate_view_resources(root, &languages(), true).await.unwrap();

    assert_eq!(snapshot(root), before);
    assert_eq!(summary.stores_written, 0);
    assert_eq!(summary.files_written, 0);
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_generate_view_resources_withEscapedText_shouldBeStableOnSecondRun() {
    let dir = common::create_temp_dir().unwrap();
    let root = dir.path();
    let view = common::create_test_file(
        root,
        "Views/Home/Terms.cshtml",
        "<p>Terms &amp; Conditions</p>\n<p>1 &lt; 2</p>\n",
    )
    .unwrap();
    let controller = common::test_controller(Config::default(), Arc::new(MockTranslator::working()));

    controller.generate_view_resources(root, &languages(), true).await.unwrap();
    let before = snapshot(root);

    let rewritten = fs::read_to_string(&view).unwrap();
    assert!(rewritten.contains("@Localizer[\"Terms &amp; Conditions\"]"));
    assert!(rewritten.contains("@Localizer[\"1 &lt; 2\"]"));
    let store = ResourceStore::load(&root.join("Resources/Views/Home/Terms.xx.resx"));
    assert_eq!(store.keys().collect::<Vec<_>>(), vec!["1 &lt; 2", "Terms &amp; Conditions"]);

    let mock = Arc::new(MockTranslator::working());
    let controller = common::test_controller(Config::default(), mock.clone());
    let summary = controller.generate_view_resources(root, &languages(), true).await.unwrap();

    assert_eq!(snapshot(root), before);
    assert_eq!(summary.stores_written, 0);
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_wrap_views_withCrlfScriptOnlyView_shouldNotRewrite() {
    let dir = common::create_temp_dir().unwrap();
    let root = dir.path();
    let content = "@using A\r\n@inject IViewLocalizer Localizer\r\n";
    let view = common::create_test_file(root, "Views/Shared/Imports.cshtml", content).unwrap();
    let controller = common::test_controller(Config::default(), Arc::new(MockTranslator::working()));

    let summary = controller.wrap_views(root, true).await.unwrap();

    assert_eq!(summary.files_written, 0);
    assert_eq!(fs::read_to_string(&view).unwrap(), content);
}

#[tokio::test]
async fn test_generate_view_resources_withNoKeys_shouldNotCreateStore() {
    let dir = common::create_temp_dir().unwrap();
    let root = dir.path();
    common::create_test_file(root, "Views/Home/Code.cshtml", "@{\n    Layout = null;\n}\n").unwrap();
    let controller = common::test_controller(Config::default(), Arc::new(MockTranslator::working()));

    let summary = controller.generate_view_resources(root, &languages(), true).await.unwrap();

    assert_eq!(summary.processed, 1);
    assert!(!root.join("Resources").exists());
    assert_eq!(common::list_files(root), vec!["Views/Home/Code.cshtml"]);
}

#[tokio::test]
async fn test_generate_view_resources_withFailedKey_shouldKeepViewAndStore() {
    let dir = common::create_temp_dir().unwrap();
    let root = dir.path();
    let view = common::create_test_view(root, "Views/Home/Index.cshtml").unwrap();
    let original = fs::read_to_string(&view).unwrap();
    let controller = common::test_controller(Config::default(), Arc::new(MockTranslator::failing_on("Welcome")));

    let summary = controller.generate_view_resources(root, &languages(), true).await.unwrap();

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.processed, 0);
    assert_eq!(fs::read_to_string(&view).unwrap(), original);
    assert!(!root.join("Resources/Views/Home/Index.xx.resx").exists());
}

#[tokio::test]
async fn test_generate_view_resources_withDryRun_shouldWriteNothing() {
    let dir = common::create_temp_dir().unwrap();
    let root = dir.path();
    common::create_test_view(root, "Views/Home/Index.cshtml").unwrap();
    let before = snapshot(root);
    let mock = Arc::new(MockTranslator::working());
    let controller = common::test_controller(Config::default(), mock.clone());

    let summary = controller.generate_view_resources(root, &languages(), false).await.unwrap();

    assert_eq!(summary.processed, 1);
    assert_eq!(summary.stores_written, 0);
    assert_eq!(snapshot(root), before);
    assert_eq!(mock.call_count(), 2);
}

#[tokio::test]
async fn test_generate_view_resources_withMissingRoot_shouldFail() {
    let dir = common::create_temp_dir().unwrap();
    let controller = common::test_controller(Config::default(), Arc::new(MockTranslator::working()));

    let result = controller
        .generate_view_resources(&dir.path().join("nope"), &languages(), true)
        .await;

    assert!(result.is_err());
}

#[test]
fn test_wrap_views_withView_shouldRewriteWithoutStores() {
    let dir = common::create_temp_dir().unwrap();
    let root = dir.path();
    let view = common::create_test_view(root, "Views/Home/Index.cshtml").unwrap();
    let mock = Arc::new(MockTranslator::working());
    let controller = common::test_controller(Config::default(), mock.clone());

    let summary = tokio_test::block_on(async { controller.wrap_views(root, true).await }).unwrap();

    assert_eq!(summary.files_written, 1);
    assert!(fs::read_to_string(&view).unwrap().contains("@Localizer[\"Welcome\"]"));
    assert!(!root.join("Resources").exists());
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_generate_csharp_resources_withCaseConflict_shouldWriteOneEntry() {
    let dir = common::create_temp_dir().unwrap();
    let root = dir.path();
    let source = r#"
public class NavController : Controller
{
    public IActionResult Index()
    {
        ViewBag.First = _localizer["Go To"];
        ViewBag.Second = _localizer["go to"];
        return View();
    }
}
"#;
    common::create_test_file(root, "Controllers/NavController.cs", source).unwrap();
    common::create_test_file(root, "obj/Generated.cs", "_localizer[\"Generated\"];").unwrap();
    let controller = common::test_controller(Config::default(), Arc::new(MockTranslator::working()));

    let summary = controller.generate_csharp_resources(root, &languages(), true).await.unwrap();

    assert_eq!(summary.processed, 1);
    let store = ResourceStore::load(&root.join("Resources/Controllers/NavController.xx.resx"));
    assert_eq!(store.len(), 1);
    assert_eq!(store.get("Go To"), Some("[xx] Go To"));
    assert!(!root.join("Resources/obj").exists());
}

#[tokio::test]
async fn test_generate_csharp_resources_withFailure_shouldKeepStoreBytes() {
    let dir = common::create_temp_dir().unwrap();
    let root = dir.path();
    let source = r#"
public class User
{
    [Display(Name = "Existing key")]
    public string Name { get; set; }

    [Required(ErrorMessage = "New key")]
    public string Email { get; set; }
}
"#;
    common::create_test_file(root, "Models/User.cs", source).unwrap();
    let store_path = root.join("Resources/Models/User.xx.resx");
    let mut existing = ResourceStore::new();
    existing.insert("Existing key", "Hand written");
    existing.save(&store_path).unwrap();
    let before = fs::read(&store_path).unwrap();
    let controller = common::test_controller(Config::default(), Arc::new(MockTranslator::failing_on("New key")));

    let summary = controller.generate_csharp_resources(root, &languages(), true).await.unwrap();

    assert_eq!(summary.failed, 1);
    assert_eq!(fs::read(&store_path).unwrap(), before);
}

#[tokio::test]
async fn test_generate_csharp_resources_withSeveralLanguages_shouldWriteStorePerLanguage() {
    let dir = common::create_temp_dir().unwrap();
    let root = dir.path();
    common::create_test_file(root, "Pages/Menu.cs", "var t = _localizer[\"Menu\"];").unwrap();
    common::create_test_file(root, "Pages/Empty.cs", "public class Empty {}").unwrap();
    let controller = common::test_controller(Config::default(), Arc::new(MockTranslator::working()));
    let languages = vec!["aa".to_string(), "bb".to_string()];

    let summary = controller.generate_csharp_resources(root, &languages, true).await.unwrap();

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.stores_written, 2);
    assert_eq!(
        common::list_files(&root.join("Resources")),
        vec!["Pages/Menu.aa.resx", "Pages/Menu.bb.resx"]
    );
    assert_eq!(
        ResourceStore::load(&root.join("Resources/Pages/Menu.bb.resx")).get("Menu"),
        Some("[bb] Menu")
    );
}
